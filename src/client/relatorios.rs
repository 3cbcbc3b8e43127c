//! `/relatorios` export endpoints. Responses are binary files, not JSON.

use super::ApiClient;
use crate::error::Result;
use crate::models::{ExportFormat, ReportFilter, ReportKind};

impl ApiClient {
    /// Download a report file exactly as the backend formats it.
    pub async fn exportar_relatorio(
        &self,
        kind: ReportKind,
        format: ExportFormat,
        filter: &ReportFilter,
    ) -> Result<Vec<u8>> {
        let request = self
            .get(&["relatorios", kind.segment(), format.segment()])?
            .query(&filter.export_params(kind));
        let bytes = self.fetch_bytes(request).await?;
        tracing::info!(
            "Downloaded {} {} report ({} bytes)",
            kind.segment(),
            format.segment(),
            bytes.len()
        );
        Ok(bytes)
    }
}
