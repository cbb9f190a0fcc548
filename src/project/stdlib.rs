//! Signatures bundled into the binary.
//!
//! The core library is loaded unless disabled; named libraries are opt-in
//! with `-r NAME`.

use std::path::PathBuf;

/// `(file name, contents)` pairs.
pub type BundledFiles = &'static [(&'static str, &'static str)];

macro_rules! bundled {
    ($dir:literal, [$($file:literal),* $(,)?]) => {
        &[$(($file, include_str!(concat!("../../sig/", $dir, "/", $file)))),*]
    };
}

/// The core library, in load order.
pub const CORE: BundledFiles = bundled!(
    "core",
    [
        "basic_object.sig",
        "object.sig",
        "kernel.sig",
        "module.sig",
        "class.sig",
        "comparable.sig",
        "enumerable.sig",
        "interfaces.sig",
        "numeric.sig",
        "string.sig",
        "symbol.sig",
        "nil.sig",
        "array.sig",
        "hash.sig",
    ]
);

const LIBRARIES: &[(&str, BundledFiles)] = &[
    ("pathname", bundled!("stdlib/pathname", ["pathname.sig"])),
    ("set", bundled!("stdlib/set", ["set.sig"])),
];

/// Files of the named library, if bundled.
pub fn library(name: &str) -> Option<BundledFiles> {
    LIBRARIES
        .iter()
        .find(|(library, _)| *library == name)
        .map(|(_, files)| *files)
}

/// Names of all bundled libraries.
pub fn library_names() -> impl Iterator<Item = &'static str> {
    LIBRARIES.iter().map(|(name, _)| *name)
}

/// Display path for a bundled file, `<core>/object.sig`.
pub fn virtual_path(library: &str, file: &str) -> PathBuf {
    PathBuf::from(format!("<{library}>")).join(file)
}
