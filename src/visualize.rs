//! Render Export
//!
//! This module serializes computed layouts for the external diagram renderer.
//! Snapshots use abbreviated keys by default to keep the data files small.
//!

use super::elements::*;
use super::layout::Layout;
use crate::chrono::Local;
use crate::serde_json;
use crate::urlencoding;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};

pub trait RenderSnapshot {
    /// take a snapshot, set `abbrev` to true to save space
    fn snapshot(&self, abbrev: bool) -> serde_json::Value;
}

impl RenderSnapshot for Element {
    fn snapshot(&self, abbrev: bool) -> serde_json::Value {
        let mut value = json!({
            if abbrev { "i" } else { "id" }: self.id,
            if abbrev { "k" } else { "kind" }: self.kind,
            "x": self.x,
            "y": self.y,
            if abbrev { "w" } else { "width" }: self.width,
            if abbrev { "h" } else { "height" }: self.height,
            if abbrev { "f" } else { "fill" }: self.style.fill,
            if abbrev { "z" } else { "z_index" }: self.style.z_index,
        });
        let object = value.as_object_mut().expect("snapshot must be an object");
        if let Shape::Triangle(direction) = self.style.shape {
            // the renderer draws triangles as clipped boxes
            object.insert(
                if abbrev { "c" } else { "clip_path" }.to_string(),
                json!(direction.clip_path()),
            );
        }
        if let Some(border) = self.style.border.as_ref() {
            object.insert(if abbrev { "b" } else { "border" }.to_string(), json!(border));
        }
        if let Some(opacity) = self.style.opacity {
            object.insert(if abbrev { "o" } else { "opacity" }.to_string(), json!(opacity));
        }
        value
    }
}

impl RenderSnapshot for Layout {
    fn snapshot(&self, abbrev: bool) -> serde_json::Value {
        let elements: Vec<serde_json::Value> = self.elements.iter().map(|element| element.snapshot(abbrev)).collect();
        json!({
            "elements": elements,
            "width": self.total_width,
            "height": self.total_height,
            "stats": self.stats,
        })
    }
}

#[derive(Debug)]
pub struct LayoutVisualizer {
    /// save to file if applicable
    file: Option<File>,
    /// all snapshots, one per rendered parameter or visibility change
    snapshots: Vec<(String, serde_json::Value)>,
}

impl LayoutVisualizer {
    /// create a new visualizer with target filename
    pub fn new(mut filename: Option<String>) -> std::io::Result<Self> {
        if cfg!(feature = "disable_visualizer") {
            filename = None; // do not open file
        }
        let file = match filename {
            Some(filename) => Some(File::create(filename)?),
            None => None,
        };
        Ok(Self {
            file,
            snapshots: Vec::new(),
        })
    }

    /// append another snapshot of the layout, and also update the file
    pub fn snapshot(&mut self, name: String, layout: &Layout) -> std::io::Result<()> {
        if cfg!(feature = "disable_visualizer") {
            return Ok(());
        }
        self.snapshots.push((name, layout.snapshot(true)));
        self.save()?;
        Ok(())
    }

    /// save to file
    pub fn save(&mut self) -> std::io::Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.set_len(0)?; // truncate the file
            file.seek(SeekFrom::Start(0))?; // move the cursor to the front
            file.write_all(
                json!({
                    "format": "lattice-canvas",
                    "version": env!("CARGO_PKG_VERSION"),
                    "snapshots": &self.snapshots,
                })
                .to_string()
                .as_bytes(),
            )?;
            file.sync_all()?;
        }
        Ok(())
    }
}

const DEFAULT_RENDER_DATA_FOLDER: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/render/data/");

pub fn render_data_folder() -> String {
    DEFAULT_RENDER_DATA_FOLDER.to_string()
}

pub fn static_render_data_filename() -> String {
    "static.json".to_string()
}

pub fn auto_render_data_filename() -> String {
    format!("{}.json", Local::now().format("%Y%m%d-%H-%M-%S%.3f"))
}

pub fn print_render_link_with_parameters(filename: &str, parameters: Vec<(String, String)>) {
    let mut link = format!("http://localhost:8066?filename={}", filename);
    for (key, value) in parameters.iter() {
        link.push('&');
        link.push_str(&urlencoding::encode(key));
        link.push('=');
        link.push_str(&urlencoding::encode(value));
    }
    println!("opening link {} (start local server by running ./render/server.sh)", link)
}

pub fn print_render_link(filename: &str) {
    print_render_link_with_parameters(filename, Vec::new())
}
