use serde::Serialize;
use serde_json::Value;

use crate::adapter::backend::BackendError;
use crate::port::DashboardApi;
use crate::query::HistoryQuery;

/// Recent file imports and vendor API syncs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct History {
    pub imports: Vec<Value>,
    pub syncs: Vec<Value>,
}

pub async fn load_history<A: DashboardApi>(api: &A, query: HistoryQuery) -> Result<History, BackendError> {
    let params = query.params();
    let (imports, syncs) = futures::try_join!(api.import_log(&params), api.sync_log(&params))?;

    Ok(History {
        imports: imports.logs,
        syncs: syncs.logs,
    })
}
