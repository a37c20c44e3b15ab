//! Core vromfs container reader module.

pub mod blk;
pub mod compression;
pub mod container;
pub mod cursor;
pub mod dict;
pub mod directory;
pub mod error;
pub mod models;
pub mod obfuscation;

pub use error::{Codec, Result, VromfsError};
pub use models::{
    BlkFraming, Container, Dict, Directory, Entry, ExtendedHeader, Framing, Header, Magic,
    PackedInfo, ParseOptions, Platform,
};
