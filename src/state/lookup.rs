//! Client-side joins between collections.
//!
//! Display names are always resolved here against the locally loaded
//! collections, never taken from the backend's denormalized fields.

use crate::models::{Aluno, Id, Mentor, Presenca, Turma};

/// Placeholder shown when a foreign key has no match.
pub const MISSING: &str = "-";

pub fn find_turma(turmas: &[Turma], id: Id) -> Option<&Turma> {
    turmas.iter().find(|t| t.id == id)
}

pub fn find_aluno(alunos: &[Aluno], id: Id) -> Option<&Aluno> {
    alunos.iter().find(|a| a.id == id)
}

pub fn find_mentor(mentores: &[Mentor], id: Id) -> Option<&Mentor> {
    mentores.iter().find(|m| m.id == id)
}

/// Name of the class a student belongs to.
pub fn resolve_class_name<'a>(aluno: &Aluno, turmas: &'a [Turma]) -> &'a str {
    find_turma(turmas, aluno.turma_id)
        .map(|t| t.nome.as_str())
        .unwrap_or(MISSING)
}

/// Student and class names for an attendance record.
pub fn resolve_attendance<'a>(presenca: &Presenca, alunos: &'a [Aluno], turmas: &'a [Turma]) -> AttendanceNames<'a> {
    let aluno = find_aluno(alunos, presenca.aluno_id);
    AttendanceNames {
        aluno_nome: aluno.map(|a| a.nome.as_str()).unwrap_or(MISSING),
        aluno_matricula: aluno.map(|a| a.matricula.as_str()).unwrap_or(MISSING),
        turma_nome: find_turma(turmas, presenca.turma_id)
            .map(|t| t.nome.as_str())
            .unwrap_or(MISSING),
    }
}

/// Joined display fields of an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceNames<'a> {
    pub aluno_nome: &'a str,
    pub aluno_matricula: &'a str,
    pub turma_nome: &'a str,
}

/// Classes that can still receive students or attendance, in list order.
pub fn active_classes(turmas: &[Turma]) -> Vec<&Turma> {
    turmas.iter().filter(|t| t.ativa).collect()
}

/// Active students of one class, in list order.
pub fn active_students_of(alunos: &[Aluno], turma_id: Id) -> Vec<&Aluno> {
    alunos
        .iter()
        .filter(|a| a.ativo && a.turma_id == turma_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::fixtures::{aluno, presenca, turma};

    #[test]
    fn test_resolve_class_name() {
        let turmas = vec![turma(1, "Turma A", "TA"), turma(2, "Turma B", "TB")];
        assert_eq!(resolve_class_name(&aluno(10, "Ana", 2), &turmas), "Turma B");
        assert_eq!(resolve_class_name(&aluno(11, "Bia", 9), &turmas), MISSING);
    }

    #[test]
    fn test_resolve_attendance() {
        let turmas = vec![turma(1, "Turma A", "TA")];
        let alunos = vec![aluno(10, "Ana", 1)];
        let names = resolve_attendance(&presenca(1, 10, 1, "2024-01-01"), &alunos, &turmas);
        assert_eq!(names.aluno_nome, "Ana");
        assert_eq!(names.aluno_matricula, "M10");
        assert_eq!(names.turma_nome, "Turma A");

        let orphan = resolve_attendance(&presenca(2, 99, 7, "2024-01-01"), &alunos, &turmas);
        assert_eq!(orphan.aluno_nome, MISSING);
        assert_eq!(orphan.turma_nome, MISSING);
    }

    #[test]
    fn test_inactive_records_still_resolve() {
        let mut turma_antiga = turma(2, "Turma Antiga", "TX");
        turma_antiga.ativa = false;
        let mut bruno = aluno(11, "Bruno", 2);
        bruno.ativo = false;
        let turmas = vec![turma(1, "Turma A", "TA"), turma_antiga];
        let alunos = vec![aluno(10, "Ana", 1), bruno];

        let names = resolve_attendance(&presenca(5, 11, 2, "2024-01-01"), &alunos, &turmas);
        assert_eq!(names.aluno_nome, "Bruno");
        assert_eq!(names.turma_nome, "Turma Antiga");

        let ids: Vec<_> = active_classes(&turmas).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
        assert!(active_students_of(&alunos, 2).is_empty());
    }

    #[test]
    fn test_active_students_of() {
        let mut inactive = aluno(3, "Caio", 1);
        inactive.ativo = false;
        let alunos = vec![aluno(1, "Ana", 1), aluno(2, "Bia", 2), inactive];
        let ids: Vec<_> = active_students_of(&alunos, 1).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
