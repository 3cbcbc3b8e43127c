//! Entity abstraction that parameterizes the list/dialog container.

use chrono::NaiveDateTime;

use super::filters::{AlunoFilter, ChamadaFilter, MentorFilter, PresencaFilter, TurmaFilter, format_date_br};
use super::forms::{AlunoForm, ChamadaForm, FieldErrors, MentorForm, PresencaForm, TurmaForm};
use super::lookup;
use crate::models::{
    Aluno, AlunoPayload, ChamadaMentor, ChamadaMentorPayload, EstatisticasChamadas, Id, Mentor, MentorPayload,
    Presenca, PresencaPayload, Turma, TurmaPayload,
};

/// A backend collection managed by a [`ListState`](super::ListState).
pub trait Entity: Clone + Send + Sync + 'static {
    /// Body sent on create and update.
    type Payload: Clone + Send + Sync + 'static;
    /// Editable dialog state.
    type Form: EntityForm<Self>;
    /// Client-side filter inputs.
    type Filter: EntityFilter<Self>;
    /// Auxiliary collections loaded alongside the main list.
    type Lookup: Clone + Default + Send + Sync + 'static;

    /// Capitalized singular noun used in messages.
    const NOUN: &'static str;
    /// Lowercase plural used in load errors.
    const PLURAL: &'static str;
    /// Grammatical gender of `NOUN`.
    const FEMININE: bool;

    fn id(&self) -> Id;

    /// Confirmation text naming the record about to be deleted.
    fn delete_prompt(&self, lookup: &Self::Lookup) -> String;

    /// Message for an HTTP 400 rejection of a save, when the backend uses
    /// 400 for a known domain conflict.
    fn conflict_message() -> Option<&'static str> {
        None
    }

    fn created_message() -> String {
        format!("{} {} com sucesso!", Self::NOUN, gendered::<Self>("criado"))
    }

    fn updated_message() -> String {
        format!("{} {} com sucesso!", Self::NOUN, gendered::<Self>("atualizado"))
    }

    fn removed_message() -> String {
        format!("{} {} com sucesso!", Self::NOUN, gendered::<Self>("removido"))
    }
}

/// Turn a masculine participle ending in `o` into the entity's gender.
fn gendered<E: Entity + ?Sized>(participle: &str) -> String {
    match participle.strip_suffix('o') {
        Some(stem) if E::FEMININE => format!("{stem}a"),
        _ => participle.to_string(),
    }
}

/// Dialog form bound to an entity.
pub trait EntityForm<E: Entity>: Clone + Default + Send {
    /// Blank form for creation. `now` seeds date/time defaults.
    fn blank(_now: NaiveDateTime) -> Self {
        Self::default()
    }

    /// Form seeded from an existing record.
    fn from_record(record: &E) -> Self;

    /// Check required fields and formats, producing the payload.
    fn validate(&self) -> Result<E::Payload, FieldErrors>;
}

/// Client-side filter over an entity collection.
pub trait EntityFilter<E: Entity>: Clone + Default {
    /// Whether a record passes every active criterion (logical AND).
    fn matches(&self, record: &E, lookup: &E::Lookup) -> bool;

    /// Whether any criterion is set.
    fn is_active(&self) -> bool;
}

/// Collections needed to display and filter attendance records.
#[derive(Debug, Clone, Default)]
pub struct PresencaLookup {
    pub turmas: Vec<Turma>,
    pub alunos: Vec<Aluno>,
}

/// Active mentors and aggregate numbers for the roll-call page.
#[derive(Debug, Clone, Default)]
pub struct ChamadaLookup {
    pub mentores: Vec<Mentor>,
    pub estatisticas: EstatisticasChamadas,
}

impl Entity for Turma {
    type Payload = TurmaPayload;
    type Form = TurmaForm;
    type Filter = TurmaFilter;
    type Lookup = ();

    const NOUN: &'static str = "Turma";
    const PLURAL: &'static str = "turmas";
    const FEMININE: bool = true;

    fn id(&self) -> Id {
        self.id
    }

    fn delete_prompt(&self, _lookup: &()) -> String {
        format!("Tem certeza que deseja remover a turma \"{}\"?", self.nome)
    }
}

impl Entity for Aluno {
    type Payload = AlunoPayload;
    type Form = AlunoForm;
    type Filter = AlunoFilter;
    type Lookup = Vec<Turma>;

    const NOUN: &'static str = "Aluno";
    const PLURAL: &'static str = "alunos";
    const FEMININE: bool = false;

    fn id(&self) -> Id {
        self.id
    }

    fn delete_prompt(&self, _lookup: &Vec<Turma>) -> String {
        format!("Tem certeza que deseja remover o aluno \"{}\"?", self.nome)
    }
}

impl Entity for Presenca {
    type Payload = PresencaPayload;
    type Form = PresencaForm;
    type Filter = PresencaFilter;
    type Lookup = PresencaLookup;

    const NOUN: &'static str = "Presença";
    const PLURAL: &'static str = "presenças";
    const FEMININE: bool = true;

    fn id(&self) -> Id {
        self.id
    }

    fn delete_prompt(&self, lookup: &PresencaLookup) -> String {
        let names = lookup::resolve_attendance(self, &lookup.alunos, &lookup.turmas);
        format!(
            "Tem certeza que deseja remover a presença de \"{}\" do dia {}?",
            names.aluno_nome,
            format_date_br(&self.data_presenca)
        )
    }

    fn created_message() -> String {
        "Presença registrada com sucesso!".to_string()
    }
}

impl Entity for Mentor {
    type Payload = MentorPayload;
    type Form = MentorForm;
    type Filter = MentorFilter;
    type Lookup = ();

    const NOUN: &'static str = "Mentor";
    const PLURAL: &'static str = "mentores";
    const FEMININE: bool = false;

    fn id(&self) -> Id {
        self.id
    }

    fn delete_prompt(&self, _lookup: &()) -> String {
        format!("Tem certeza que deseja remover o mentor \"{}\"?", self.nome)
    }

    fn conflict_message() -> Option<&'static str> {
        Some("Erro: Verifique se o email já não está sendo usado por outro mentor.")
    }
}

impl Entity for ChamadaMentor {
    type Payload = ChamadaMentorPayload;
    type Form = ChamadaForm;
    type Filter = ChamadaFilter;
    type Lookup = ChamadaLookup;

    const NOUN: &'static str = "Chamada";
    const PLURAL: &'static str = "chamadas";
    const FEMININE: bool = true;

    fn id(&self) -> Id {
        self.id
    }

    fn delete_prompt(&self, _lookup: &ChamadaLookup) -> String {
        format!(
            "Tem certeza que deseja remover a chamada do dia {}?",
            format_date_br(&self.data_chamada)
        )
    }

    fn conflict_message() -> Option<&'static str> {
        Some("Erro: Já existe uma chamada para esta data.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gendered_messages() {
        assert_eq!(Turma::created_message(), "Turma criada com sucesso!");
        assert_eq!(Aluno::updated_message(), "Aluno atualizado com sucesso!");
        assert_eq!(ChamadaMentor::removed_message(), "Chamada removida com sucesso!");
        assert_eq!(Presenca::created_message(), "Presença registrada com sucesso!");
    }

    #[test]
    fn test_conflict_messages() {
        assert!(Turma::conflict_message().is_none());
        assert!(ChamadaMentor::conflict_message().unwrap().contains("Já existe uma chamada"));
        assert!(Mentor::conflict_message().unwrap().contains("email"));
    }
}
