/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

mod macros;
mod parsers;

pub mod album;
pub mod api;
pub mod catalog;
pub mod client;
pub mod creds;
pub mod errors;
pub mod expansion;
pub mod filesystem;
pub mod folder;
pub mod image;
pub mod node;
pub mod options;
pub mod pagination;
pub mod pipeline;
pub mod properties;
pub mod upload;
pub mod uploadable;
pub mod user;
pub mod walker;

pub use album::*;
pub use api::*;
pub use catalog::*;
pub use client::*;
pub use creds::*;
pub use errors::*;
pub use expansion::*;
pub use filesystem::*;
pub use folder::*;
pub use image::*;
pub use node::*;
pub use options::*;
pub use pagination::*;
pub use pipeline::*;
pub use properties::*;
pub use upload::*;
pub use uploadable::*;
pub use user::*;
pub use walker::*;
