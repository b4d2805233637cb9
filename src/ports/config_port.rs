//! Configuration access port trait.

pub trait ConfigPort {
    /// Raw value of `key` in `section`, if present.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Names of every section in the source.
    fn sections(&self) -> Vec<String>;
}
