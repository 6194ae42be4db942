use std::fmt;

use crate::teams::{self, LegendTeam, Team};

pub const FALLBACK_CODE: &str = "KBO";
pub const FALLBACK_COLOR: &str = "#6B7280";
/// Shown when the service sends a blank team label.
pub const UNNAMED_TEAM: &str = "알 수 없는 팀";

// Checked in order, current clubs before historical ones. Only tokens that
// belong to the current franchise alone are listed, so "해태 타이거즈" does
// not land on KIA through the shared nickname.
const CURRENT_ALIASES: &[(&str, &[&str])] = &[
    ("SSG", &["ssg", "랜더스", "landers"]),
    ("KIA", &["kia", "기아"]),
    ("SAMSUNG", &["삼성", "라이온즈", "samsung", "lions"]),
    ("LG", &["lg", "엘지", "트윈스", "twins"]),
    ("DOOSAN", &["두산", "doosan"]),
    ("KT", &["kt", "케이티", "위즈", "wiz"]),
    ("LOTTE", &["롯데", "자이언츠", "lotte", "giants"]),
    ("HANWHA", &["한화", "hanwha"]),
    ("NC", &["nc", "엔씨", "다이노스", "dinos"]),
    ("KIWOOM", &["키움", "kiwoom"]),
];

const LEGEND_ALIASES: &[(&str, &[&str])] = &[
    ("HAITAI", &["해태", "haitai"]),
    ("MBC", &["mbc", "청룡", "bluedragons"]),
    ("OB", &["ob베어스", "obbears", "ob"]),
    ("BINGGRAE", &["빙그레", "binggrae"]),
    ("SAMMI", &["삼미", "슈퍼스타즈", "sammi", "superstars"]),
    ("CHUNGBO", &["청보", "핀토스", "chungbo", "pintos"]),
    ("PACIFIC", &["태평양", "돌핀스", "pacific", "dolphins"]),
    ("HYUNDAI", &["현대", "유니콘스", "hyundai", "unicorns"]),
    ("SSANGBANGWOOL", &["쌍방울", "레이더스", "ssangbangwool", "raiders"]),
    ("SK", &["sk와이번스", "와이번스", "wyverns", "sk"]),
    ("NEXEN", &["넥센", "nexen"]),
    ("WOORI", &["우리히어로즈", "woori"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTag {
    Rank(u8),
    Legend,
    Unranked,
}

impl fmt::Display for RankTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankTag::Rank(rank) => write!(f, "{rank}위"),
            RankTag::Legend => f.write_str("LEGEND"),
            RankTag::Unranked => f.write_str("-"),
        }
    }
}

/// Styling for a matched team.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTeam {
    pub code: String,
    pub full_name: String,
    pub color: &'static str,
    pub rank: RankTag,
    pub ticket_url: Option<&'static str>,
    /// Seasons played, for legend teams.
    pub seasons: Option<&'static str>,
}

impl From<&Team> for DisplayTeam {
    fn from(team: &Team) -> Self {
        Self {
            code: team.code.to_string(),
            full_name: team.full_name.to_string(),
            color: team.color,
            rank: RankTag::Rank(team.rank),
            ticket_url: Some(team.ticket_url),
            seasons: None,
        }
    }
}

impl From<&LegendTeam> for DisplayTeam {
    fn from(team: &LegendTeam) -> Self {
        Self {
            code: team.code.to_string(),
            full_name: team.full_name.to_string(),
            color: team.color,
            rank: RankTag::Legend,
            ticket_url: None,
            seasons: Some(team.seasons),
        }
    }
}

enum Resolved {
    Current(&'static Team),
    Legend(&'static LegendTeam),
}

fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn find_alias(table: &[(&'static str, &[&str])], label: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| label.contains(alias)))
        .map(|(code, _)| *code)
}

fn resolve(raw: &str) -> Option<Resolved> {
    let label = normalize(raw);
    if label.is_empty() {
        return None;
    }

    if let Some(team) = find_alias(CURRENT_ALIASES, &label).and_then(teams::by_code) {
        return Some(Resolved::Current(team));
    }
    find_alias(LEGEND_ALIASES, &label)
        .and_then(teams::legend_by_code)
        .map(Resolved::Legend)
}

/// Maps the service's team label to display styling. Never fails: labels
/// that match nothing get a neutral card carrying the raw label, or
/// [`UNNAMED_TEAM`] when the label is blank.
pub fn present(team_label: &str) -> DisplayTeam {
    match resolve(team_label) {
        Some(Resolved::Current(team)) => team.into(),
        Some(Resolved::Legend(team)) => team.into(),
        None => {
            let full_name = if team_label.trim().is_empty() {
                UNNAMED_TEAM
            } else {
                team_label
            };
            DisplayTeam {
                code: FALLBACK_CODE.to_string(),
                full_name: full_name.to_string(),
                color: FALLBACK_COLOR,
                rank: RankTag::Unranked,
                ticket_url: None,
                seasons: None,
            }
        }
    }
}

/// Canonical headline name for a team label, e.g. "SSG" -> "SSG 랜더스".
pub fn format_team_name(raw: &str) -> String {
    match resolve(raw) {
        Some(Resolved::Current(team)) => team.full_name.to_string(),
        Some(Resolved::Legend(team)) => team.full_name.to_string(),
        None if raw.trim().is_empty() => UNNAMED_TEAM.to_string(),
        None => raw.trim().to_string(),
    }
}
