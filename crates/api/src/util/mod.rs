pub mod passwords;

#[cfg(test)]
pub mod test;
