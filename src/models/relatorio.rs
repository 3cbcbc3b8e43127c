//! Report filters, export kinds and formats.

use chrono::NaiveDate;

use super::Id;

/// Which backend report to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Presencas,
    Alunos,
    Turmas,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [Self::Presencas, Self::Alunos, Self::Turmas];

    /// Path segment under `/relatorios`.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Presencas => "presencas",
            Self::Alunos => "alunos",
            Self::Turmas => "turmas",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Presencas => "Presenças",
            Self::Alunos => "Alunos",
            Self::Turmas => "Turmas",
        }
    }
}

/// File format produced by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl ExportFormat {
    /// Path segment after the report kind.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }
}

/// Parse a date typed as `YYYY-MM-DD` or `DD/MM/YYYY`.
///
/// Accepts `-`, `/`, `.` or space as separators.
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input
        .trim()
        .split(['-', '/', ' ', '.'])
        .filter(|s| !s.is_empty())
        .collect();

    let [first, second, third] = parts.as_slice() else {
        return None;
    };

    let (year, month, day) = if third.len() == 4 {
        (third, second, first)
    } else {
        (first, second, third)
    };

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Report filters. Empty fields are omitted from requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub turma_id: Option<Id>,
    pub data_inicio: String,
    pub data_fim: String,
}

impl ReportFilter {
    fn date(value: &str) -> Option<String> {
        parse_flexible_date(value).map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Check that typed dates parse and form a valid range.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let inicio = self.data_inicio.trim();
        let fim = self.data_fim.trim();
        let start = match inicio {
            "" => None,
            s => Some(parse_flexible_date(s).ok_or_else(|| format!("Data inicial inválida: {s}"))?),
        };
        let end = match fim {
            "" => None,
            s => Some(parse_flexible_date(s).ok_or_else(|| format!("Data final inválida: {s}"))?),
        };
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err("A data inicial deve ser anterior à data final.".to_string());
        }
        Ok(())
    }

    /// Query for the preview dataset: `turmaId`, `dataInicio`, `dataFim`.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.turma_id {
            params.push(("turmaId", id.to_string()));
        }
        if let Some(inicio) = Self::date(&self.data_inicio) {
            params.push(("dataInicio", inicio));
        }
        if let Some(fim) = Self::date(&self.data_fim) {
            params.push(("dataFim", fim));
        }
        params
    }

    /// Query for a file export. Student exports only take the class and
    /// class exports take nothing.
    pub fn export_params(&self, kind: ReportKind) -> Vec<(&'static str, String)> {
        match kind {
            ReportKind::Presencas => self.query_params(),
            ReportKind::Alunos => self
                .turma_id
                .map(|id| vec![("turmaId", id.to_string())])
                .unwrap_or_default(),
            ReportKind::Turmas => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Default file name for a downloaded report.
pub fn export_filename(kind: ReportKind, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "relatorio-{kind}-{date}.{ext}",
        kind = kind.segment(),
        date = date.format("%Y-%m-%d"),
        ext = format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(
            export_filename(ReportKind::Presencas, ExportFormat::Excel, date),
            "relatorio-presencas-2024-06-09.xlsx"
        );
        assert_eq!(
            export_filename(ReportKind::Turmas, ExportFormat::Csv, date),
            "relatorio-turmas-2024-06-09.csv"
        );
    }

    #[test]
    fn test_parse_flexible_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_flexible_date("2024-03-05"), expected);
        assert_eq!(parse_flexible_date("2024/3/5"), expected);
        assert_eq!(parse_flexible_date("05/03/2024"), expected);
        assert_eq!(parse_flexible_date(" 5.3.2024 "), expected);
        assert_eq!(parse_flexible_date("2024-02-30"), None);
        assert_eq!(parse_flexible_date("ontem"), None);
    }

    #[test]
    fn test_query_params_omit_empty() {
        let filter = ReportFilter {
            turma_id: None,
            data_inicio: "01/02/2024".into(),
            data_fim: String::new(),
        };
        assert_eq!(filter.query_params(), vec![("dataInicio", "2024-02-01".to_string())]);
        assert!(ReportFilter::default().query_params().is_empty());
    }

    #[test]
    fn test_export_params_per_kind() {
        let filter = ReportFilter {
            turma_id: Some(3),
            data_inicio: "2024-01-01".into(),
            data_fim: "2024-01-31".into(),
        };
        assert_eq!(filter.export_params(ReportKind::Presencas).len(), 3);
        assert_eq!(
            filter.export_params(ReportKind::Alunos),
            vec![("turmaId", "3".to_string())]
        );
        assert!(filter.export_params(ReportKind::Turmas).is_empty());
    }

    #[test]
    fn test_validate_range() {
        let mut filter = ReportFilter {
            turma_id: None,
            data_inicio: "2024-02-01".into(),
            data_fim: "2024-01-01".into(),
        };
        assert!(filter.validate().is_err());
        filter.data_fim = "2024-02-28".into();
        assert!(filter.validate().is_ok());
        filter.data_inicio = "xx".into();
        assert!(filter.validate().is_err());
    }
}
