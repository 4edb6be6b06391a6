// ATS resume scoring.
// Pure, synchronous scoring over a structured resume; handlers only wrap it in HTTP.

pub mod handlers;
pub mod keywords;
pub mod scorer;
