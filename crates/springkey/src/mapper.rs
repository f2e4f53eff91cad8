//! Ready-made sample-to-declaration mappers.
//!
//! Any `Fn(f64) -> String` works as a mapper; these cover the common
//! transform and opacity cases.
//!
//! ```rust
//! use springkey::mapper;
//!
//! let m = mapper::translate_x("px");
//! assert_eq!(m(12.5), "transform:translateX(12.5px)");
//! ```

/// `transform:translateX(<v><unit>)`.
pub fn translate_x(unit: impl Into<String>) -> impl Fn(f64) -> String {
    let unit = unit.into();
    move |v| format!("transform:translateX({v}{unit})")
}

/// `transform:translateY(<v><unit>)`.
pub fn translate_y(unit: impl Into<String>) -> impl Fn(f64) -> String {
    let unit = unit.into();
    move |v| format!("transform:translateY({v}{unit})")
}

/// `transform:scale(<base + v>)`.
///
/// Springs settle at zero, so the displacement is offset by `base`
/// (usually `1.0`) to settle at the element's natural size.
pub fn scale(base: f64) -> impl Fn(f64) -> String {
    move |v| format!("transform:scale({})", base + v)
}

/// `transform:rotate(<v>deg)`.
pub fn rotate() -> impl Fn(f64) -> String {
    |v| format!("transform:rotate({v}deg)")
}

/// `opacity:<1 - v>`, clamped to `0..=1`.
pub fn opacity() -> impl Fn(f64) -> String {
    |v| format!("opacity:{}", (1.0 - v).clamp(0.0, 1.0))
}

/// Arbitrary `<name>:<v><unit>` declaration.
pub fn property(name: impl Into<String>, unit: impl Into<String>) -> impl Fn(f64) -> String {
    let name = name.into();
    let unit = unit.into();
    move |v| format!("{name}:{v}{unit}")
}
