//! `/presencas` endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::{Id, Presenca, PresencaPayload, PresencaRapida, ReportFilter};

impl ApiClient {
    pub async fn listar_presencas(&self) -> Result<Vec<Presenca>> {
        self.fetch_list(self.get(&["presencas"])?).await
    }

    pub async fn listar_presencas_por_turma(&self, turma_id: Id) -> Result<Vec<Presenca>> {
        self.fetch_list(self.get(&["presencas", "turma", &turma_id.to_string()])?)
            .await
    }

    pub async fn listar_presencas_por_aluno(&self, aluno_id: Id) -> Result<Vec<Presenca>> {
        self.fetch_list(self.get(&["presencas", "aluno", &aluno_id.to_string()])?)
            .await
    }

    /// Records on one date (`YYYY-MM-DD`).
    pub async fn listar_presencas_por_data(&self, data: &str) -> Result<Vec<Presenca>> {
        self.fetch_list(self.get(&["presencas", "data", data])?).await
    }

    pub async fn listar_presencas_por_turma_e_data(&self, turma_id: Id, data: &str) -> Result<Vec<Presenca>> {
        self.fetch_list(self.get(&["presencas", "turma", &turma_id.to_string(), "data", data])?)
            .await
    }

    pub async fn listar_presencas_por_periodo(&self, data_inicio: &str, data_fim: &str) -> Result<Vec<Presenca>> {
        let request = self
            .get(&["presencas", "periodo"])?
            .query(&[("dataInicio", data_inicio), ("dataFim", data_fim)]);
        self.fetch_list(request).await
    }

    pub async fn buscar_presenca(&self, id: Id) -> Result<Option<Presenca>> {
        self.fetch_one(self.get(&["presencas", &id.to_string()])?).await
    }

    pub async fn registrar_presenca(&self, presenca: &PresencaPayload) -> Result<Option<Presenca>> {
        self.fetch_one(self.post(&["presencas"], presenca)?).await
    }

    /// Quick register: the server stamps the current date and time.
    ///
    /// Every call creates a new record; there is no duplicate guard.
    pub async fn registrar_presenca_rapida(&self, request: PresencaRapida) -> Result<Option<Presenca>> {
        tracing::info!(
            "Quick attendance: aluno {} turma {}",
            request.aluno_id,
            request.turma_id
        );
        self.fetch_one(self.post(&["presencas", "rapida"], &request)?).await
    }

    pub async fn atualizar_presenca(&self, id: Id, presenca: &PresencaPayload) -> Result<Option<Presenca>> {
        self.fetch_one(self.put(&["presencas", &id.to_string()], presenca)?)
            .await
    }

    pub async fn remover_presenca(&self, id: Id) -> Result<()> {
        self.fetch_unit(self.delete(&["presencas", &id.to_string()])?).await
    }

    /// Filtered report dataset; absent filters are omitted from the query.
    pub async fn gerar_relatorio_presencas(&self, filter: &ReportFilter) -> Result<Vec<Presenca>> {
        let request = self
            .get(&["presencas", "relatorio"])?
            .query(&filter.query_params());
        self.fetch_list(request).await
    }

    pub async fn contar_presencas_por_turma(&self, turma_id: Id) -> Result<u64> {
        let count = self
            .fetch_one(self.get(&["presencas", "turma", &turma_id.to_string(), "contar"])?)
            .await?;
        Ok(count.unwrap_or(0))
    }

    pub async fn contar_presencas_por_aluno(&self, aluno_id: Id) -> Result<u64> {
        let count = self
            .fetch_one(self.get(&["presencas", "aluno", &aluno_id.to_string(), "contar"])?)
            .await?;
        Ok(count.unwrap_or(0))
    }
}
