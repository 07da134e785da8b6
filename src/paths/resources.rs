use std::fmt;
use std::marker::PhantomData;

/// A value that renders to a REST path
pub trait PathResource {
    fn path(&self) -> &str;
}

/// Path object that can be rooted below a parent path by an identifier
pub trait ChildPath: Sized {
    fn child_of(base: &str, id: &str) -> Self;
}

/// `base/segment`. A trailing `/` on `base` is dropped so every constructor
/// yields single separators.
pub(crate) fn join(base: &str, segment: &str) -> String {
    format!("{}/{}", trim_base(base), segment)
}

pub(crate) fn trim_base(base: &str) -> &str {
    base.trim_end_matches('/')
}

/// Leaf path: `base/segment`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleResource {
    path: String,
}

impl SimpleResource {
    pub fn new(base: &str, segment: impl fmt::Display) -> Self {
        Self {
            path: join(base, &segment.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl PathResource for SimpleResource {
    fn path(&self) -> &str {
        &self.path
    }
}

impl ChildPath for SimpleResource {
    fn child_of(base: &str, id: &str) -> Self {
        SimpleResource::new(base, id)
    }
}

impl fmt::Display for SimpleResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Collection path `base/segment` whose members are reached through `id`
pub struct SimpleResourceCollection<T = SimpleResource> {
    path: String,
    child: PhantomData<fn() -> T>,
}

impl<T: ChildPath> SimpleResourceCollection<T> {
    pub fn new(base: &str, segment: impl fmt::Display) -> Self {
        Self {
            path: join(base, &segment.to_string()),
            child: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `path/id`
    pub fn id(&self, id: impl fmt::Display) -> T {
        T::child_of(&self.path, &id.to_string())
    }
}

impl<T> PathResource for SimpleResourceCollection<T> {
    fn path(&self) -> &str {
        &self.path
    }
}

// Manual impls: the child type only appears in PhantomData.
impl<T> Clone for SimpleResourceCollection<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            child: PhantomData,
        }
    }
}

impl<T> fmt::Debug for SimpleResourceCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleResourceCollection")
            .field("path", &self.path)
            .finish()
    }
}

impl<T> PartialEq for SimpleResourceCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl<T> Eq for SimpleResourceCollection<T> {}

impl<T> fmt::Display for SimpleResourceCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_resource() {
        let resource = SimpleResource::new("/api/v3", "statuses");
        assert_eq!(resource.path(), "/api/v3/statuses");
        assert_eq!(resource.to_string(), "/api/v3/statuses");
    }

    #[test]
    fn test_collection_members() {
        let statuses: SimpleResourceCollection = SimpleResourceCollection::new("/api/v3", "statuses");
        assert_eq!(statuses.id(3).path(), "/api/v3/statuses/3");
        assert_eq!(statuses.id("abc").path(), "/api/v3/statuses/abc");
        assert_eq!(statuses.clone(), statuses);
    }

    #[test]
    fn test_trailing_slash_on_base() {
        assert_eq!(SimpleResource::new("/api/v3/", "statuses").path(), "/api/v3/statuses");

        let versions: SimpleResourceCollection = SimpleResourceCollection::new("/api/v3//", "versions");
        assert_eq!(versions.id(1).path(), "/api/v3/versions/1");
    }
}
