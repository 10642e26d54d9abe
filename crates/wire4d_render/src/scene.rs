//! Scene: the set of objects a frame renders

use slotmap::{new_key_type, SlotMap};

use crate::Object4D;

new_key_type! {
    /// Key to an object in a [`Scene`]
    ///
    /// Generational: a key to a removed object stays invalid even after its
    /// slot is reused.
    pub struct ObjectKey;
}

/// Object container with stable keys
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: SlotMap<ObjectKey, Object4D>,
}

impl Scene {
    pub fn new() -> Self {
        Self { objects: SlotMap::with_key() }
    }

    pub fn add(&mut self, object: Object4D) -> ObjectKey {
        self.objects.insert(object)
    }

    pub fn remove(&mut self, key: ObjectKey) -> Option<Object4D> {
        self.objects.remove(key)
    }

    pub fn get(&self, key: ObjectKey) -> Option<&Object4D> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut Object4D> {
        self.objects.get_mut(key)
    }

    /// First object with the given name
    pub fn find_by_name(&self, name: &str) -> Option<ObjectKey> {
        self.objects.iter().find(|(_, o)| o.name() == name).map(|(k, _)| k)
    }

    pub fn find_by_id(&self, id: u32) -> Option<ObjectKey> {
        self.objects.iter().find(|(_, o)| o.id() == id).map(|(k, _)| k)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = ObjectKey> + '_ {
        self.objects.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &Object4D)> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectKey, &mut Object4D)> {
        self.objects.iter_mut()
    }

    /// Total polygons across all objects
    pub fn poly_count(&self) -> usize {
        self.objects.values().map(|o| o.polys().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mesh, Pose};
    use wire4d_math::Vec3;
    use wire4d_screen::Color;

    fn object(id: u32, name: &str) -> Object4D {
        let mesh = Mesh {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            polys: vec![[0, 1, 2]],
            colors: vec![Color::WHITE],
            ..Default::default()
        };
        Object4D::new(id, name, mesh, Pose::default()).unwrap()
    }

    #[test]
    fn test_add_and_find() {
        let mut scene = Scene::new();
        let a = scene.add(object(1, "cube"));
        let b = scene.add(object(2, "pyramid"));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.find_by_name("pyramid"), Some(b));
        assert_eq!(scene.find_by_id(1), Some(a));
        assert_eq!(scene.find_by_name("missing"), None);
        assert_eq!(scene.poly_count(), 2);
    }

    #[test]
    fn test_removed_key_is_stale() {
        let mut scene = Scene::new();
        let a = scene.add(object(1, "a"));
        assert!(scene.remove(a).is_some());
        let b = scene.add(object(2, "b"));
        assert!(scene.get(a).is_none());
        assert_eq!(scene.get(b).unwrap().name(), "b");
        assert!(!scene.is_empty());
    }
}
