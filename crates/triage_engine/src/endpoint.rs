/// Which history records to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryFilter {
    All,
    Category(String),
}

/// Remote service routes, relative to the configured API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    ProcessText,
    ProcessPdf,
    ProcessTxt,
    History(HistoryFilter),
    HistoryStats,
}

impl Endpoint {
    /// Path segments appended to the base URL. An empty last segment keeps
    /// the trailing slash the list route is mounted with.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::ProcessText => vec!["email", "process-text"],
            Endpoint::ProcessPdf => vec!["email", "process-pdf"],
            Endpoint::ProcessTxt => vec!["email", "process-txt"],
            Endpoint::History(HistoryFilter::All) => vec!["history", ""],
            Endpoint::History(HistoryFilter::Category(category)) => {
                vec!["history", "category", category.as_str()]
            }
            Endpoint::HistoryStats => vec!["history", "stats"],
        }
    }

    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}
