pub mod bloom;
pub mod uniqueness;

/// Approximate set membership over string items.
pub trait SetMembership {
    fn contains(&self, item: &str) -> bool;
    fn add(&mut self, item: &str);

    fn might_contain(&self, item: &str) -> bool {
        self.contains(item)
    }
}
