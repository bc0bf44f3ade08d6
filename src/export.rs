use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::store::PointStore;

pub const JSON_FILE_NAME: &str = "image-labels.json";
pub const CSV_FILE_NAME: &str = "image-labels.csv";

/// `{ "images": { "<id>": [ {"x": .., "y": ..}, .. ] } }`
#[derive(Serialize)]
pub struct ExportDocument<'a> {
    images: &'a PointStore,
}

impl<'a> ExportDocument<'a> {
    pub fn new(images: &'a PointStore) -> Self {
        Self { images }
    }

    /// Pretty-printed with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One `image,x,y` row per point, visit order then click order.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("image,x,y\n");
        for (id, points) in self.images.export_all() {
            let id = csv_field(id);
            for p in points {
                out.push_str(&format!("{},{},{}\n", id, p.x, p.y));
            }
        }
        out
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_csv())?;
        Ok(())
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Point;

    fn sample_store() -> PointStore {
        let mut store = PointStore::new();
        store.ensure("a.png");
        store.ensure("empty.png");
        store.ensure("b.png");
        store.append("a.png", Point::new(100, 200)).unwrap();
        store.append("a.png", Point::new(3, 4)).unwrap();
        store.append("b.png", Point::new(50, 50)).unwrap();
        store
    }

    #[test]
    fn test_json_is_pretty_with_two_spaces() {
        let mut store = PointStore::new();
        store.ensure("a.png");
        store.append("a.png", Point::new(1, 2)).unwrap();

        let json = ExportDocument::new(&store).to_json().unwrap();
        let expected = "{\n  \"images\": {\n    \"a.png\": [\n      {\n        \"x\": 1,\n        \"y\": 2\n      }\n    ]\n  }\n}";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_json_includes_visited_images_without_points() {
        let store = sample_store();
        let json = ExportDocument::new(&store).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let images = value["images"].as_object().unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(value["images"]["empty.png"], serde_json::json!([]));
        assert_eq!(
            value["images"]["a.png"],
            serde_json::json!([{"x": 100, "y": 200}, {"x": 3, "y": 4}])
        );
    }

    #[test]
    fn test_csv_rows_in_order() {
        let store = sample_store();
        let csv = ExportDocument::new(&store).to_csv();
        assert_eq!(csv, "image,x,y\na.png,100,200\na.png,3,4\nb.png,50,50\n");
    }

    #[test]
    fn test_csv_quotes_awkward_ids() {
        let mut store = PointStore::new();
        store.ensure("shots, day \"1\".png");
        store.append("shots, day \"1\".png", Point::new(7, 8)).unwrap();

        let csv = ExportDocument::new(&store).to_csv();
        assert_eq!(csv, "image,x,y\n\"shots, day \"\"1\"\".png\",7,8\n");
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = sample_store();
        let doc = ExportDocument::new(&store);

        let json_path = dir.path().join(JSON_FILE_NAME);
        let csv_path = dir.path().join(CSV_FILE_NAME);
        doc.write_json(&json_path).unwrap();
        doc.write_csv(&csv_path).unwrap();

        assert_eq!(std::fs::read_to_string(&json_path).unwrap(), doc.to_json().unwrap());
        assert_eq!(std::fs::read_to_string(&csv_path).unwrap(), doc.to_csv());
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = sample_store();
        let path = dir.path().join("missing").join(JSON_FILE_NAME);
        assert!(ExportDocument::new(&store).write_json(&path).is_err());
    }
}
