//! `/turmas` endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::{Id, Turma, TurmaPayload};

impl ApiClient {
    /// List active classes.
    pub async fn listar_turmas(&self) -> Result<Vec<Turma>> {
        self.fetch_list(self.get(&["turmas"])?).await
    }

    /// List every class, including inactive ones.
    pub async fn listar_todas_turmas(&self) -> Result<Vec<Turma>> {
        self.fetch_list(self.get(&["turmas", "todas"])?).await
    }

    pub async fn buscar_turma(&self, id: Id) -> Result<Option<Turma>> {
        self.fetch_one(self.get(&["turmas", &id.to_string()])?).await
    }

    pub async fn buscar_turma_por_codigo(&self, codigo: &str) -> Result<Option<Turma>> {
        self.fetch_one(self.get(&["turmas", "codigo", codigo])?).await
    }

    /// Classes whose name contains `nome` (server-side match).
    pub async fn buscar_turmas_por_nome(&self, nome: &str) -> Result<Vec<Turma>> {
        self.fetch_list(self.get(&["turmas", "buscar"])?.query(&[("nome", nome)]))
            .await
    }

    pub async fn criar_turma(&self, turma: &TurmaPayload) -> Result<Option<Turma>> {
        self.fetch_one(self.post(&["turmas"], turma)?).await
    }

    pub async fn atualizar_turma(&self, id: Id, turma: &TurmaPayload) -> Result<Option<Turma>> {
        self.fetch_one(self.put(&["turmas", &id.to_string()], turma)?).await
    }

    /// Soft delete: the class is marked inactive.
    pub async fn remover_turma(&self, id: Id) -> Result<()> {
        self.fetch_unit(self.delete(&["turmas", &id.to_string()])?).await
    }

    /// Permanent delete.
    pub async fn excluir_turma(&self, id: Id) -> Result<()> {
        self.fetch_unit(self.delete(&["turmas", &id.to_string(), "permanente"])?)
            .await
    }
}
