pub mod db;
pub mod user;

#[cfg(test)]
mod tests;
