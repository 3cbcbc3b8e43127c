//! Data models for classes, students, attendance, mentors and roll-calls.
//!
//! Field names follow the backend's camelCase JSON. Dates and times stay as
//! the strings the backend sends (`YYYY-MM-DD`, `HH:MM[:SS]`) so that
//! client-side date filters are exact string matches.

pub mod aluno;
pub mod chamada_mentor;
pub mod mentor;
pub mod presenca;
pub mod relatorio;
pub mod turma;

pub use aluno::{Aluno, AlunoPayload};
pub use chamada_mentor::{ChamadaMentor, ChamadaMentorPayload, EstatisticasChamadas, Participante, ParticipantePayload};
pub use mentor::{Mentor, MentorPayload, TipoMentor};
pub use presenca::{Presenca, PresencaPayload, PresencaRapida};
pub use relatorio::{ExportFormat, ReportFilter, ReportKind};
pub use turma::{Turma, TurmaPayload};

/// Backend identifier type.
pub type Id = i64;
