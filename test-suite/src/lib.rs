#[cfg(test)]
mod rewards;
