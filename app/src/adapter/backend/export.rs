use super::BackendError;

/// Click report as delivered by the CSV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClicksExport {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    raw: String,
}

impl ClicksExport {
    pub fn parse(raw: String) -> Result<Self, BackendError> {
        let (headers, rows) = {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .from_reader(raw.as_bytes());

            let headers: Vec<String> = reader
                .headers()
                .map_err(BackendError::Csv)?
                .iter()
                .map(str::to_owned)
                .collect();

            let rows = reader
                .records()
                .map(|record| record.map(|r| r.iter().map(str::to_owned).collect()))
                .collect::<Result<Vec<Vec<String>>, _>>()
                .map_err(BackendError::Csv)?;

            (headers, rows)
        };

        Ok(Self { headers, rows, raw })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}
