use crate::domain::model::Product;
use crate::domain::ports::ProductStore;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads the ERP product export and writes the classified copy next to it.
#[derive(Debug, Clone)]
pub struct CsvProductStore {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl CsvProductStore {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl ProductStore for CsvProductStore {
    async fn load(&self) -> Result<Vec<Product>> {
        let mut reader = csv::Reader::from_path(&self.input_path)?;
        let mut products = Vec::new();
        for row in reader.deserialize() {
            let product: Product = row?;
            products.push(product);
        }

        tracing::debug!(
            "Loaded {} products from {}",
            products.len(),
            self.input_path.display()
        );
        Ok(products)
    }

    async fn save(&self, products: &[Product]) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.output_path)?;
        for product in products {
            writer.serialize(product)?;
        }
        writer.flush()?;

        tracing::debug!(
            "Wrote {} products to {}",
            products.len(),
            self.output_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PRODUCTS_CSV: &str = "\
id,article_number,name,weight,dimensions,tariff_number
123,126-9002-001,Distressed Rustic Concrete Vase,1.7 kg,\"7\"\" Tall x 7.25\"\" Wide\",
124,126-9002-002,Glazed Bowl,0.4 kg,12 x 12 x 5 cm,69120025
";

    #[test]
    fn test_load_products() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("products.csv");
        fs::write(&input, PRODUCTS_CSV).unwrap();

        let store = CsvProductStore::new(&input, dir.path().join("out.csv"));
        let products = tokio_test::block_on(store.load()).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "123");
        assert_eq!(products[0].dimensions, "7\" Tall x 7.25\" Wide");
        assert_eq!(products[0].tariff_number, None);
        assert_eq!(products[1].tariff_number.as_deref(), Some("69120025"));
    }

    #[tokio::test]
    async fn test_save_writes_tariff_numbers() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("products.csv");
        let output = dir.path().join("nested").join("classified.csv");
        fs::write(&input, PRODUCTS_CSV).unwrap();

        let store = CsvProductStore::new(&input, &output);
        let mut products = store.load().await.unwrap();
        products[0].tariff_number = Some("69139010".to_string());
        store.save(&products).await.unwrap();

        let reread = CsvProductStore::new(&output, &output).load().await.unwrap();
        assert_eq!(reread, products);

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("id,article_number,name,weight,dimensions,tariff_number"));
        assert!(written.contains("69139010"));
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let store = CsvProductStore::new(dir.path().join("absent.csv"), dir.path().join("o.csv"));
        assert!(store.load().await.is_err());
    }
}
