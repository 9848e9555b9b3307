use super::Histogram;

#[cfg(test)]
pub fn histo64(capacity: usize) -> Histogram<u64> {
    Histogram::<u64>::with_capacity(capacity).unwrap()
}
