use strum::{EnumIter, EnumString};

/// Document classes the backend tags hits with. Unknown tags fall into
/// [`DocKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DocKind {
    EcnNotice,
    EcnApplication,
    Complaint,
    Fmea,
    #[strum(disabled)]
    Other,
}

impl DocKind {
    /// Kinds a search can be restricted to
    pub const FILTERABLE: [DocKind; 4] = [
        DocKind::EcnNotice,
        DocKind::EcnApplication,
        DocKind::Complaint,
        DocKind::Fmea,
    ];

    pub fn from_doc_type(doc_type: &str) -> Self {
        doc_type.trim().parse().unwrap_or(DocKind::Other)
    }

    /// Backend `doc_type` value, as used by the doc type filter
    pub fn tag(self) -> &'static str {
        match self {
            DocKind::EcnNotice => "ECN_NOTICE",
            DocKind::EcnApplication => "ECN_APPLICATION",
            DocKind::Complaint => "COMPLAINT",
            DocKind::Fmea => "FMEA",
            DocKind::Other => "",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocKind::EcnNotice => "ECN 通知",
            DocKind::EcnApplication => "ECN 申請",
            DocKind::Complaint => "客訴記錄",
            DocKind::Fmea => "FMEA 分析",
            DocKind::Other => "其他文件",
        }
    }

    /// Badge accent as RGB
    pub fn accent(self) -> [u8; 3] {
        match self {
            DocKind::EcnNotice => [0x3b, 0x82, 0xf6],
            DocKind::EcnApplication => [0x8b, 0x5c, 0xf6],
            DocKind::Complaint => [0xef, 0x44, 0x44],
            DocKind::Fmea => [0xf5, 0x9e, 0x0b],
            DocKind::Other => [0x6b, 0x72, 0x80],
        }
    }
}
