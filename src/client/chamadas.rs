//! `/chamadas-mentores` endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::{ChamadaMentor, ChamadaMentorPayload, EstatisticasChamadas, Id};

const BASE: &str = "chamadas-mentores";

impl ApiClient {
    pub async fn listar_chamadas(&self) -> Result<Vec<ChamadaMentor>> {
        self.fetch_list(self.get(&[BASE])?).await
    }

    pub async fn buscar_chamada(&self, id: Id) -> Result<Option<ChamadaMentor>> {
        self.fetch_one(self.get(&[BASE, &id.to_string()])?).await
    }

    pub async fn buscar_chamada_por_data(&self, data: &str) -> Result<Option<ChamadaMentor>> {
        self.fetch_one(self.get(&[BASE, "data", data])?).await
    }

    pub async fn listar_chamadas_por_periodo(&self, data_inicio: &str, data_fim: &str) -> Result<Vec<ChamadaMentor>> {
        let request = self
            .get(&[BASE, "periodo"])?
            .query(&[("dataInicio", data_inicio), ("dataFim", data_fim)]);
        self.fetch_list(request).await
    }

    /// Fails with HTTP 400 when a roll-call already exists for the date.
    pub async fn criar_chamada(&self, chamada: &ChamadaMentorPayload) -> Result<Option<ChamadaMentor>> {
        self.fetch_one(self.post(&[BASE], chamada)?).await
    }

    pub async fn atualizar_chamada(&self, id: Id, chamada: &ChamadaMentorPayload) -> Result<Option<ChamadaMentor>> {
        self.fetch_one(self.put(&[BASE, &id.to_string()], chamada)?).await
    }

    pub async fn remover_chamada(&self, id: Id) -> Result<()> {
        self.fetch_unit(self.delete(&[BASE, &id.to_string()])?).await
    }

    pub async fn estatisticas_chamadas(&self) -> Result<EstatisticasChamadas> {
        Ok(self
            .fetch_one(self.get(&[BASE, "estatisticas"])?)
            .await?
            .unwrap_or_default())
    }
}
