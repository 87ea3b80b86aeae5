use clap::ValueEnum;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, ValueEnum)]
pub enum Locale {
    En,
    Ko,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ko => "ko",
        }
    }

    pub fn dictionary(self) -> &'static Dictionary {
        match self {
            Self::En => &EN,
            Self::Ko => &KO,
        }
    }

    /// Localized label for a category name, or the name itself when no table
    /// knows it.
    pub fn translate(self, label: &str) -> &str {
        self.dictionary().translate(label)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    pub const ALL: [DayPart; 4] = [
        DayPart::Morning,
        DayPart::Afternoon,
        DayPart::Evening,
        DayPart::Night,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }
}

#[derive(Debug)]
pub struct DayPartLabels {
    pub morning: &'static str,
    pub afternoon: &'static str,
    pub evening: &'static str,
    pub night: &'static str,
}

impl DayPartLabels {
    pub fn label(&self, part: DayPart) -> &'static str {
        match part {
            DayPart::Morning => self.morning,
            DayPart::Afternoon => self.afternoon,
            DayPart::Evening => self.evening,
            DayPart::Night => self.night,
        }
    }

    fn lookup(&self, label: &str) -> Option<&'static str> {
        DayPart::ALL
            .into_iter()
            .find(|part| part.as_str() == label)
            .map(|part| self.label(part))
    }
}

/// Everything a locale contributes to rendering.
#[derive(Debug)]
pub struct Dictionary {
    pub session_types: &'static [(&'static str, &'static str)],
    pub friction_types: &'static [(&'static str, &'static str)],
    pub error_types: &'static [(&'static str, &'static str)],
    pub day_parts: DayPartLabels,
    pub no_data: &'static str,
    pub total: &'static str,
    pub group_separator: char,
    pub date_separator: &'static str,
    /// Hours added to Pacific-time histogram keys to reach local civil time.
    pub default_hour_offset: i32,
}

impl Dictionary {
    pub fn translate<'a>(&self, label: &'a str) -> &'a str {
        lookup(self.session_types, label)
            .or_else(|| lookup(self.friction_types, label))
            .or_else(|| lookup(self.error_types, label))
            .or_else(|| self.day_parts.lookup(label))
            .unwrap_or(label)
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], label: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(source, _)| *source == label)
        .map(|(_, translated)| *translated)
}

static EN: Dictionary = Dictionary {
    session_types: &[],
    friction_types: &[],
    error_types: &[],
    day_parts: DayPartLabels {
        morning: "Morning (6-12)",
        afternoon: "Afternoon (12-18)",
        evening: "Evening (18-24)",
        night: "Night (0-6)",
    },
    no_data: "No data",
    total: "Total",
    group_separator: ',',
    date_separator: " to ",
    default_hour_offset: 0,
};

static KO: Dictionary = Dictionary {
    session_types: &[
        ("Iterative Refinement", "반복 개선"),
        ("Multi Task", "다중 작업"),
        ("Exploration", "탐색"),
        ("Quick Question", "빠른 질문"),
        ("Single Task", "단일 작업"),
        ("Debugging", "디버깅"),
        ("Code Review", "코드 리뷰"),
    ],
    friction_types: &[
        ("Wrong Approach", "잘못된 접근"),
        ("Misunderstood Request", "요청 오해"),
        ("Slow Response", "느린 응답"),
        ("Tool Error", "도구 오류"),
    ],
    error_types: &[
        ("Command Failed", "명령 실패"),
        ("Other", "기타"),
        ("File Not Found", "파일 미발견"),
        ("User Rejected", "사용자 거부"),
        ("File Too Large", "파일 과대"),
        ("Edit Failed", "편집 실패"),
    ],
    day_parts: DayPartLabels {
        morning: "오전 (6-12)",
        afternoon: "오후 (12-18)",
        evening: "저녁 (18-24)",
        night: "심야 (0-6)",
    },
    no_data: "데이터 없음",
    total: "전체",
    group_separator: ',',
    date_separator: " ~ ",
    default_hour_offset: 17,
};
