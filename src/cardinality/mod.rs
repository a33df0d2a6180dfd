pub mod hll;

/// Approximate distinct counting over string items.
pub trait Cardinality {
    fn estimate(&self) -> f64;
    fn add(&mut self, item: &str);
}
