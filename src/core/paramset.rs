//! Bundle up parameters and their values in a generic way.
//!
//! Shapes are configured from a **ParamSet**: typed lists of named
//! values, each list looked up by name with a default for anything
//! the scene description left out.

// std
use std::cell::Cell;
// others
use log::warn;
// pbrt
use crate::core::geometry::{Point2f, Point3f};
use crate::core::pbrt::Float;

// see paramset.h

#[derive(Debug, Clone)]
pub struct ParamSetItem<T> {
    pub name: String,
    pub values: Vec<T>,
    pub looked_up: Cell<bool>,
}

impl<T> ParamSetItem<T> {
    fn new(name: &str, values: Vec<T>) -> Self {
        ParamSetItem {
            name: String::from(name),
            values,
            looked_up: Cell::new(false),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ParamSet {
    pub bools: Vec<ParamSetItem<bool>>,
    pub ints: Vec<ParamSetItem<i32>>,
    pub floats: Vec<ParamSetItem<Float>>,
    pub point2fs: Vec<ParamSetItem<Point2f>>,
    pub point3fs: Vec<ParamSetItem<Point3f>>,
    pub strings: Vec<ParamSetItem<String>>,
    pub textures: Vec<ParamSetItem<String>>,
}

/// Adding a parameter replaces an earlier one with the same name.
fn add_item<T>(items: &mut Vec<ParamSetItem<T>>, name: &str, values: Vec<T>) {
    items.retain(|item| item.name != name);
    items.push(ParamSetItem::new(name, values));
}

/// Groups a flat list of coordinates into tuples of *n*, dropping
/// (and reporting) a trailing incomplete tuple.
fn chunk_coordinates(name: &str, values: &[Float], n: usize) -> Vec<Vec<Float>> {
    if values.len() % n != 0 {
        warn!(
            "Parameter \"{}\" needs {} coordinates per value, ignoring {} excess value(s)",
            name,
            n,
            values.len() % n
        );
    }
    values.chunks_exact(n).map(|c| c.to_vec()).collect()
}

/// The single value of the named parameter, or the default *d*.
pub fn lookup_one<T>(items: &[ParamSetItem<T>], name: &str, d: T) -> T
where
    T: Clone,
{
    for item in items {
        if item.name == name && item.values.len() == 1 {
            item.looked_up.set(true);
            return item.values[0].clone();
        }
    }
    d
}

/// All values of the named parameter (empty if it was not given).
pub fn lookup_all<T>(items: &[ParamSetItem<T>], name: &str) -> Vec<T>
where
    T: Clone,
{
    for item in items {
        if item.name == name {
            item.looked_up.set(true);
            return item.values.clone();
        }
    }
    Vec::new()
}

impl ParamSet {
    pub fn add_bool(&mut self, name: &str, value: bool) {
        add_item(&mut self.bools, name, vec![value]);
    }
    pub fn add_int(&mut self, name: &str, value: i32) {
        add_item(&mut self.ints, name, vec![value]);
    }
    pub fn add_ints(&mut self, name: &str, values: Vec<i32>) {
        add_item(&mut self.ints, name, values);
    }
    pub fn add_float(&mut self, name: &str, value: Float) {
        add_item(&mut self.floats, name, vec![value]);
    }
    pub fn add_floats(&mut self, name: &str, values: Vec<Float>) {
        add_item(&mut self.floats, name, values);
    }
    pub fn add_point2fs(&mut self, name: &str, values: Vec<Float>) {
        let points: Vec<Point2f> = chunk_coordinates(name, &values, 2)
            .into_iter()
            .map(|c| Point2f { x: c[0], y: c[1] })
            .collect();
        add_item(&mut self.point2fs, name, points);
    }
    pub fn add_point3fs(&mut self, name: &str, values: Vec<Float>) {
        let points: Vec<Point3f> = chunk_coordinates(name, &values, 3)
            .into_iter()
            .map(|c| Point3f {
                x: c[0],
                y: c[1],
                z: c[2],
            })
            .collect();
        add_item(&mut self.point3fs, name, points);
    }
    pub fn add_string(&mut self, name: &str, value: &str) {
        add_item(&mut self.strings, name, vec![String::from(value)]);
    }
    /// Records a reference to a named texture.
    pub fn add_texture(&mut self, name: &str, texture_name: &str) {
        add_item(&mut self.textures, name, vec![String::from(texture_name)]);
    }
    pub fn find_one_bool(&self, name: &str, d: bool) -> bool {
        lookup_one(&self.bools, name, d)
    }
    pub fn find_one_int(&self, name: &str, d: i32) -> i32 {
        lookup_one(&self.ints, name, d)
    }
    pub fn find_one_float(&self, name: &str, d: Float) -> Float {
        lookup_one(&self.floats, name, d)
    }
    pub fn find_one_string(&self, name: &str, d: String) -> String {
        lookup_one(&self.strings, name, d)
    }
    pub fn find_one_filename(&self, name: &str, d: String) -> String {
        let filename: String = self.find_one_string(name, String::new());
        if filename.is_empty() {
            d
        } else {
            filename
        }
    }
    /// Name of the texture bound to the parameter, empty if none.
    pub fn find_texture(&self, name: &str) -> String {
        lookup_one(&self.textures, name, String::new())
    }
    pub fn find_int(&self, name: &str) -> Vec<i32> {
        lookup_all(&self.ints, name)
    }
    pub fn find_float(&self, name: &str) -> Vec<Float> {
        lookup_all(&self.floats, name)
    }
    pub fn find_point2f(&self, name: &str) -> Vec<Point2f> {
        lookup_all(&self.point2fs, name)
    }
    pub fn find_point3f(&self, name: &str) -> Vec<Point3f> {
        lookup_all(&self.point3fs, name)
    }
    /// Names of parameters nobody asked for, useful to report typos in
    /// scene descriptions.
    pub fn unused_parameters(&self) -> Vec<String> {
        fn collect<T>(items: &[ParamSetItem<T>], unused: &mut Vec<String>) {
            for item in items {
                if !item.looked_up.get() {
                    unused.push(item.name.clone());
                }
            }
        }
        let mut unused: Vec<String> = Vec::new();
        collect(&self.bools, &mut unused);
        collect(&self.ints, &mut unused);
        collect(&self.floats, &mut unused);
        collect(&self.point2fs, &mut unused);
        collect(&self.point3fs, &mut unused);
        collect(&self.strings, &mut unused);
        collect(&self.textures, &mut unused);
        unused
    }
    pub fn report_unused(&self) {
        for name in self.unused_parameters() {
            warn!("Parameter \"{}\" not used", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_values_fall_back_to_defaults() {
        let mut ps = ParamSet::default();
        ps.add_float("l1", 2.5);
        ps.add_int("nu", 3);
        assert_eq!(ps.find_one_float("l1", 1.0), 2.5);
        assert_eq!(ps.find_one_float("l2", 1.0), 1.0);
        assert_eq!(ps.find_one_int("nu", -1), 3);
        assert_eq!(ps.find_one_int("nv", -1), -1);
        assert_eq!(ps.find_texture("alpha"), "");
    }

    #[test]
    fn arrays_are_not_single_values() {
        let mut ps = ParamSet::default();
        ps.add_floats("Py", vec![0.0, 1.0, 2.0]);
        assert_eq!(ps.find_one_float("Py", -1.0), -1.0);
        assert_eq!(ps.find_float("Py"), vec![0.0, 1.0, 2.0]);
        assert!(ps.find_float("missing").is_empty());
    }

    #[test]
    fn later_values_replace_earlier_ones() {
        let mut ps = ParamSet::default();
        ps.add_float("dir", 1.0);
        ps.add_float("dir", -1.0);
        assert_eq!(ps.floats.len(), 1);
        assert_eq!(ps.find_one_float("dir", 0.0), -1.0);
    }

    #[test]
    fn points_are_grouped_and_excess_dropped() {
        let mut ps = ParamSet::default();
        ps.add_point3fs("P", vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let p = ps.find_point3f("P");
        assert_eq!(p.len(), 2);
        assert_eq!(p[1], Point3f { x: 3.0, y: 4.0, z: 5.0 });
        ps.add_point2fs("uv", vec![0.0, 1.0]);
        assert_eq!(ps.find_point2f("uv"), vec![Point2f { x: 0.0, y: 1.0 }]);
    }

    #[test]
    fn tracks_unused_parameters() {
        let mut ps = ParamSet::default();
        ps.add_float("l1", 2.0);
        ps.add_float("typo", 2.0);
        ps.add_string("name", "quad");
        ps.find_one_float("l1", 1.0);
        assert_eq!(ps.find_one_string("name", String::new()), "quad");
        assert_eq!(ps.unused_parameters(), vec![String::from("typo")]);
    }
}
