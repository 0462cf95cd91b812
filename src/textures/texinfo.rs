//! Image textures are expensive to decode and filter, and scenes
//! often reference the same image many times. **TexInfo** captures
//! everything that influences the loaded result, so a cache keyed by
//! it hands out one shared instance per distinct set of settings.

// std
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
// others
use log::{debug, warn};
// pbrt
use crate::core::mipmap::ImageWrap;
use crate::core::paramset::ParamSet;
use crate::core::pbrt::Float;

// see texinfo.h

#[derive(Debug, Clone)]
pub struct TexInfo {
    pub filename: String,
    pub do_trilinear: bool,
    pub max_aniso: Float,
    pub wrap_mode: ImageWrap,
    pub scale: Float,
    pub gamma: bool,
}

impl TexInfo {
    pub fn new(
        filename: &str,
        do_trilinear: bool,
        max_aniso: Float,
        wrap_mode: ImageWrap,
        scale: Float,
        gamma: bool,
    ) -> Self {
        TexInfo {
            filename: String::from(filename),
            do_trilinear,
            max_aniso,
            wrap_mode,
            scale,
            gamma,
        }
    }
    /// Reads the image texture parameters; 8-bit formats are assumed to
    /// be gamma encoded unless stated otherwise.
    pub fn from_params(params: &ParamSet) -> Self {
        let filename: String = params.find_one_filename("filename", String::new());
        let do_trilinear: bool = params.find_one_bool("trilinear", false);
        let max_aniso: Float = params.find_one_float("maxanisotropy", 8.0);
        let wrap: String = params.find_one_string("wrap", String::from("repeat"));
        let wrap_mode: ImageWrap = wrap.parse().unwrap_or_else(|err| {
            warn!("{}, using \"repeat\"", err);
            ImageWrap::Repeat
        });
        let scale: Float = params.find_one_float("scale", 1.0);
        let lower: String = filename.to_lowercase();
        let encoded: bool = lower.ends_with(".tga") || lower.ends_with(".png");
        let gamma: bool = params.find_one_bool("gamma", encoded);
        TexInfo {
            filename,
            do_trilinear,
            max_aniso,
            wrap_mode,
            scale,
            gamma,
        }
    }
}

/// Numeric order; NaN falls back to the IEEE total order so that the
/// key order stays total.
fn cmp_float(a: Float, b: Float) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

impl Ord for TexInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.filename
            .cmp(&other.filename)
            .then(self.do_trilinear.cmp(&other.do_trilinear))
            .then_with(|| cmp_float(self.max_aniso, other.max_aniso))
            .then_with(|| cmp_float(self.scale, other.scale))
            .then_with(|| match (self.gamma, other.gamma) {
                // the key without gamma correction sorts first
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                _ => Ordering::Equal,
            })
            .then(self.wrap_mode.cmp(&other.wrap_mode))
    }
}

impl PartialOrd for TexInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TexInfo {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TexInfo {}

/// Shares one instance of *T* (typically a filtered image pyramid)
/// per distinct **TexInfo**.
#[derive(Debug)]
pub struct TexInfoCache<T> {
    textures: BTreeMap<TexInfo, Arc<T>>,
}

impl<T> Default for TexInfoCache<T> {
    fn default() -> Self {
        TexInfoCache {
            textures: BTreeMap::new(),
        }
    }
}

impl<T> TexInfoCache<T> {
    pub fn new() -> Self {
        TexInfoCache::default()
    }
    pub fn get(&self, info: &TexInfo) -> Option<Arc<T>> {
        self.textures.get(info).cloned()
    }
    /// Returns the cached instance for *info*, creating it on first use.
    pub fn get_or_insert_with<F>(&mut self, info: TexInfo, create: F) -> Arc<T>
    where
        F: FnOnce(&TexInfo) -> T,
    {
        if let Some(texture) = self.textures.get(&info) {
            return texture.clone();
        }
        debug!("Creating texture for {:?}", info.filename);
        let texture: Arc<T> = Arc::new(create(&info));
        self.textures.insert(info, texture.clone());
        texture
    }
    /// Like **get_or_insert_with** for loaders that can fail; failures
    /// are not cached.
    pub fn try_get_or_insert_with<F, E>(&mut self, info: TexInfo, create: F) -> Result<Arc<T>, E>
    where
        F: FnOnce(&TexInfo) -> Result<T, E>,
    {
        if let Some(texture) = self.textures.get(&info) {
            return Ok(texture.clone());
        }
        let texture: Arc<T> = Arc::new(create(&info)?);
        self.textures.insert(info, texture.clone());
        Ok(texture)
    }
    pub fn len(&self) -> usize {
        self.textures.len()
    }
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
    /// Drops the cache's references; textures still held by shapes or
    /// materials stay alive.
    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(filename: &str) -> TexInfo {
        TexInfo::new(filename, false, 8.0, ImageWrap::Repeat, 1.0, false)
    }

    #[test]
    fn filename_takes_precedence() {
        let mut a = key("a.png");
        let mut b = key("b.png");
        a.scale = 10.0;
        b.do_trilinear = true;
        assert!(a < b);
    }

    #[test]
    fn field_precedence() {
        let base = key("wood.exr");
        let mut trilinear = base.clone();
        trilinear.do_trilinear = true;
        trilinear.max_aniso = 1.0;
        assert!(base < trilinear);

        let mut aniso = base.clone();
        aniso.max_aniso = 16.0;
        aniso.scale = 0.5;
        assert!(base < aniso);

        let mut scaled = base.clone();
        scaled.scale = 2.0;
        scaled.gamma = false;
        scaled.wrap_mode = ImageWrap::Repeat;
        assert!(base < scaled);

        let mut gamma = base.clone();
        gamma.gamma = true;
        gamma.wrap_mode = ImageWrap::Repeat;
        let mut wrapped = base.clone();
        wrapped.wrap_mode = ImageWrap::Clamp;
        assert!(base < gamma);
        assert!(wrapped < gamma);
        assert!(base < wrapped);
    }

    #[test]
    fn gamma_false_sorts_first() {
        let mut linear = key("sky.png");
        let mut encoded = key("sky.png");
        linear.gamma = false;
        encoded.gamma = true;
        assert!(linear < encoded);
        assert!(!(encoded < linear));
        assert_ne!(linear, encoded);
    }

    #[test]
    fn equal_keys_are_equal() {
        assert_eq!(key("a.png"), key("a.png"));
        let mut zero = key("a.png");
        let mut negative_zero = key("a.png");
        zero.scale = 0.0;
        negative_zero.scale = -0.0;
        assert_eq!(zero, negative_zero);
    }

    #[test]
    fn nan_fields_still_order_totally() {
        let mut nan = key("a.png");
        nan.max_aniso = Float::NAN;
        let plain = key("a.png");
        assert_eq!(nan, nan.clone());
        assert_ne!(nan, plain);
        assert!((nan < plain) ^ (plain < nan));
    }

    #[test]
    fn defaults_from_params() {
        let mut ps = ParamSet::default();
        ps.add_string("filename", "textures/grid.PNG");
        ps.add_string("wrap", "clamp");
        let info = TexInfo::from_params(&ps);
        assert_eq!(info.filename, "textures/grid.PNG");
        assert!(!info.do_trilinear);
        assert_eq!(info.max_aniso, 8.0);
        assert_eq!(info.wrap_mode, ImageWrap::Clamp);
        assert_eq!(info.scale, 1.0);
        assert!(info.gamma);

        let mut exr = ParamSet::default();
        exr.add_string("filename", "env.exr");
        exr.add_string("wrap", "mirror");
        exr.add_bool("trilinear", true);
        let info = TexInfo::from_params(&exr);
        assert!(info.do_trilinear);
        assert!(!info.gamma);
        assert_eq!(info.wrap_mode, ImageWrap::Repeat);
    }

    #[test]
    fn cache_shares_instances_per_key() {
        let mut cache: TexInfoCache<Vec<Float>> = TexInfoCache::new();
        let mut loads = 0;
        let a = cache.get_or_insert_with(key("a.png"), |_| {
            loads += 1;
            vec![1.0]
        });
        let again = cache.get_or_insert_with(key("a.png"), |_| {
            loads += 1;
            vec![2.0]
        });
        assert!(Arc::ptr_eq(&a, &again));
        let mut other_key = key("a.png");
        other_key.wrap_mode = ImageWrap::Black;
        let other = cache.get_or_insert_with(other_key, |_| vec![3.0]);
        assert!(!Arc::ptr_eq(&a, &other));
        assert_eq!(loads, 1);
        assert_eq!(cache.len(), 2);

        let failed: Result<Arc<Vec<Float>>, String> =
            cache.try_get_or_insert_with(key("missing.png"), |info| {
                Err(format!("cannot read {}", info.filename))
            });
        assert!(failed.is_err());
        assert!(cache.get(&key("missing.png")).is_none());

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(a[0], 1.0);
    }
}
