use crate::domain::model::FruitQueryResult;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::Serialize;

pub const DEFAULT_FILE_PATTERN: &str = "fruit_batch_{index}.json";

/// Splits `names` into consecutive groups of `size`; the last group may be shorter.
pub fn partition(names: &[String], size: usize) -> Vec<&[String]> {
    names.chunks(size.max(1)).collect()
}

/// File name for a 1-based batch index.
pub fn batch_file_name(pattern: &str, batch_index: usize) -> String {
    pattern.replace("{index}", &batch_index.to_string())
}

/// Pretty JSON with four-space indentation. Non-ASCII text is written as UTF-8, not escaped.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

pub struct BatchWriter<S: Storage> {
    storage: S,
    file_pattern: String,
}

impl<S: Storage> BatchWriter<S> {
    pub fn new(storage: S, file_pattern: impl Into<String>) -> Self {
        Self {
            storage,
            file_pattern: file_pattern.into(),
        }
    }

    pub fn file_name(&self, batch_index: usize) -> String {
        batch_file_name(&self.file_pattern, batch_index)
    }

    /// Overwrites any previous file for the same index.
    pub async fn write_batch(&self, results: &[FruitQueryResult], batch_index: usize) -> Result<String> {
        let file_name = self.file_name(batch_index);
        let json_data = to_pretty_json(results)?;

        tracing::debug!(
            "Writing batch {} ({} results, {} bytes) to {}",
            batch_index,
            results.len(),
            json_data.len(),
            file_name
        );
        let path = self.storage.write_file(&file_name, &json_data).await?;

        tracing::info!("💾 {} records saved to '{}'", results.len(), path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use serde_json::json;
    use tempfile::TempDir;

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("fruit {}", i)).collect()
    }

    fn result(fruit: &str, scientific: &str) -> FruitQueryResult {
        FruitQueryResult {
            fruit: Some(json!(fruit)),
            scientific_name: Some(json!(scientific)),
            etymology: Some(json!("Etimologia")),
            origin: Some(json!("Origem")),
            cultivation_practices: Some(json!("Manejo")),
            ..Default::default()
        }
    }

    #[test]
    fn test_partition_seven_names_in_threes() {
        let all = names(7);
        let groups = partition(&all, 3);

        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(groups.len(), all.len().div_ceil(3));
        assert_eq!(groups[2][0], "fruit 7");
    }

    #[test]
    fn test_partition_empty_and_exact() {
        assert!(partition(&[], 3).is_empty());
        assert_eq!(partition(&names(6), 3).len(), 2);
    }

    #[test]
    fn test_batch_file_name_uses_one_based_index() {
        assert_eq!(batch_file_name(DEFAULT_FILE_PATTERN, 1), "fruit_batch_1.json");
        assert_eq!(batch_file_name("group_{index}.json", 12), "group_12.json");
    }

    #[test]
    fn test_pretty_json_keeps_non_ascii() {
        let data = to_pretty_json(&vec![result("maçã", "Malus domestica")]).unwrap();
        let text = String::from_utf8(data).unwrap();

        assert!(text.contains("\"fruit\": \"maçã\""));
        assert!(text.contains("\n        \"fruit\""));
    }

    #[tokio::test]
    async fn test_write_batch_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        let writer = BatchWriter::new(storage, DEFAULT_FILE_PATTERN);

        let mut with_refs = result("uva", "Vitis vinifera");
        with_refs.references = Some(json!([{"1": "Ref A"}, {"2": null}]));
        with_refs.origin = Some(json!({"region": "Caucasus"}));
        let batch = vec![result("maçã", "Malus domestica"), with_refs];

        let path = writer.write_batch(&batch, 2).await.unwrap();

        assert!(path.ends_with("fruit_batch_2.json"));
        let content = std::fs::read_to_string(temp_dir.path().join("fruit_batch_2.json")).unwrap();
        let read_back: Vec<FruitQueryResult> = serde_json::from_str(&content).unwrap();
        assert_eq!(read_back, batch);
    }

    #[tokio::test]
    async fn test_write_batch_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        let writer = BatchWriter::new(storage, DEFAULT_FILE_PATTERN);

        writer
            .write_batch(&[result("banana", "Musa acuminata"), result("pera", "Pyrus communis")], 1)
            .await
            .unwrap();
        writer
            .write_batch(&[result("uva", "Vitis vinifera")], 1)
            .await
            .unwrap();

        let content = std::fs::read_to_string(temp_dir.path().join("fruit_batch_1.json")).unwrap();
        let read_back: Vec<FruitQueryResult> = serde_json::from_str(&content).unwrap();
        assert_eq!(read_back.len(), 1);
        assert_eq!(read_back[0].fruit(), Some("uva"));
    }
}
