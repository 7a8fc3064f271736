/// Identity shared by everything that can be bound into a view tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    name: Option<String>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn set_object_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn object_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
