
mod errors;
