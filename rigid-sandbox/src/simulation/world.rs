// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Ordered object storage with stable ids

use crate::objects::{Object, ObjectId};

/// The simulation's object collection
///
/// Objects keep their insertion order, which is the order pairs are
/// resolved in. Ids are handed out monotonically and never reused, so an
/// id held by the input layer cannot silently start pointing at a newer
/// object after a clear.
#[derive(Debug, Clone, Default)]
pub struct World {
    ids: Vec<ObjectId>,
    objects: Vec<Object>,
    next_id: u64,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object and return its id
    pub fn insert(&mut self, object: Object) -> ObjectId {
        let id = ObjectId::new(self.next_id);
        self.next_id += 1;
        self.ids.push(id);
        self.objects.push(object);
        id
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        // Ids are pushed in increasing order and removal keeps that order
        self.ids.binary_search(&id).ok()
    }

    /// Whether an object with this id is alive
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    /// Borrow an object by id
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.index_of(id).map(|i| &self.objects[i])
    }

    /// Mutably borrow an object by id
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.index_of(id).map(move |i| &mut self.objects[i])
    }

    /// Drop every object; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.objects.len();
        self.ids.clear();
        self.objects.clear();
        removed
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the world is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Ids in collection order
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    /// Objects in collection order
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Mutable objects in collection order
    ///
    /// A slice rather than the `Vec` so callers cannot add or remove
    /// objects behind the id table's back.
    pub fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }

    /// Iterate `(id, object)` pairs in collection order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.ids.iter().copied().zip(self.objects.iter())
    }
}
