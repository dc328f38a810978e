/// Canonical columns of a production report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Column {
    Name,
    Team,
    Completed,
    CustomGoal,
}

impl Column {
    pub(crate) const REQUIRED: [Self; 3] = [Self::Name, Self::Team, Self::Completed];

    pub(crate) const fn canonical(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Team => "team",
            Self::Completed => "completed",
            Self::CustomGoal => "custom_goal",
        }
    }

    /// Accepted headers, most preferred first.
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["nome", "name"],
            Self::Team => &["equipe", "team"],
            Self::Completed => &["realizado", "done", "completed"],
            Self::CustomGoal => &["meta_personalizada", "meta_personal", "meta", "custom_goal"],
        }
    }

    fn position(self, headers: &[String]) -> Option<usize> {
        self.aliases()
            .iter()
            .find_map(|alias| headers.iter().position(|header| header == alias))
    }
}

/// Field positions of the canonical columns within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnLayout {
    pub(crate) name: usize,
    pub(crate) team: usize,
    pub(crate) completed: usize,
    pub(crate) custom_goal: Option<usize>,
}

/// Resolves normalized headers, or lists the canonical names of the missing required columns.
pub(crate) fn resolve_layout(headers: &[String]) -> Result<ColumnLayout, Vec<&'static str>> {
    let missing: Vec<&'static str> = Column::REQUIRED
        .into_iter()
        .filter(|column| column.position(headers).is_none())
        .map(Column::canonical)
        .collect();

    match (
        Column::Name.position(headers),
        Column::Team.position(headers),
        Column::Completed.position(headers),
    ) {
        (Some(name), Some(team), Some(completed)) => Ok(ColumnLayout {
            name,
            team,
            completed,
            custom_goal: Column::CustomGoal.position(headers),
        }),
        _ => Err(missing),
    }
}

#[cfg(test)]
pub(crate) fn layout_for_tests(headers: &[&str]) -> Result<ColumnLayout, Vec<&'static str>> {
    let headers: Vec<String> = headers.iter().map(|header| header.to_string()).collect();
    resolve_layout(&headers)
}
