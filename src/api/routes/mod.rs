pub mod calendar;
pub mod flights;
pub mod ping;
pub mod player;

#[cfg(test)]
pub mod testing;
