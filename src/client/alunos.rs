//! `/alunos` endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::{Aluno, AlunoPayload, Id};

impl ApiClient {
    /// List active students.
    pub async fn listar_alunos(&self) -> Result<Vec<Aluno>> {
        self.fetch_list(self.get(&["alunos"])?).await
    }

    /// List every student, including inactive ones.
    pub async fn listar_todos_alunos(&self) -> Result<Vec<Aluno>> {
        self.fetch_list(self.get(&["alunos", "todos"])?).await
    }

    pub async fn listar_alunos_por_turma(&self, turma_id: Id) -> Result<Vec<Aluno>> {
        self.fetch_list(self.get(&["alunos", "turma", &turma_id.to_string()])?)
            .await
    }

    pub async fn buscar_aluno(&self, id: Id) -> Result<Option<Aluno>> {
        self.fetch_one(self.get(&["alunos", &id.to_string()])?).await
    }

    pub async fn buscar_aluno_por_matricula(&self, matricula: &str) -> Result<Option<Aluno>> {
        self.fetch_one(self.get(&["alunos", "matricula", matricula])?).await
    }

    pub async fn buscar_aluno_por_email(&self, email: &str) -> Result<Option<Aluno>> {
        self.fetch_one(self.get(&["alunos", "email", email])?).await
    }

    pub async fn buscar_alunos_por_nome(&self, nome: &str) -> Result<Vec<Aluno>> {
        self.fetch_list(self.get(&["alunos", "buscar"])?.query(&[("nome", nome)]))
            .await
    }

    pub async fn buscar_alunos_por_turma_e_nome(&self, turma_id: Id, nome: &str) -> Result<Vec<Aluno>> {
        let request = self
            .get(&["alunos", "turma", &turma_id.to_string(), "buscar"])?
            .query(&[("nome", nome)]);
        self.fetch_list(request).await
    }

    pub async fn criar_aluno(&self, aluno: &AlunoPayload) -> Result<Option<Aluno>> {
        self.fetch_one(self.post(&["alunos"], aluno)?).await
    }

    pub async fn atualizar_aluno(&self, id: Id, aluno: &AlunoPayload) -> Result<Option<Aluno>> {
        self.fetch_one(self.put(&["alunos", &id.to_string()], aluno)?).await
    }

    /// Soft delete: the student is marked inactive.
    pub async fn remover_aluno(&self, id: Id) -> Result<()> {
        self.fetch_unit(self.delete(&["alunos", &id.to_string()])?).await
    }

    /// Permanent delete.
    pub async fn excluir_aluno(&self, id: Id) -> Result<()> {
        self.fetch_unit(self.delete(&["alunos", &id.to_string(), "permanente"])?)
            .await
    }
}
