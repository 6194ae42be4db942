// Current KBO clubs, final 2024 regular-season standings.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Team {
    pub code: &'static str,
    pub full_name: &'static str,
    pub color: &'static str,
    pub rank: u8,
    pub win_rate: f32,
    pub games_behind: f32,
    pub ticket_url: &'static str,
}

pub const TEAMS: &[Team] = &[
    Team {
        code: "KIA",
        full_name: "KIA 타이거즈",
        color: "#EA0029",
        rank: 1,
        win_rate: 0.613,
        games_behind: 0.0,
        ticket_url: "https://tigers.co.kr/ticket/reservation",
    },
    Team {
        code: "SAMSUNG",
        full_name: "삼성 라이온즈",
        color: "#074CA1",
        rank: 2,
        win_rate: 0.553,
        games_behind: 9.0,
        ticket_url: "https://www.samsunglions.com/ticket/",
    },
    Team {
        code: "LG",
        full_name: "LG 트윈스",
        color: "#C30452",
        rank: 3,
        win_rate: 0.535,
        games_behind: 12.0,
        ticket_url: "https://www.lgtwins.com/service/html.ncd?view=/pc_twins/twins_ticket/ticket_reservation",
    },
    Team {
        code: "DOOSAN",
        full_name: "두산 베어스",
        color: "#131230",
        rank: 4,
        win_rate: 0.521,
        games_behind: 14.0,
        ticket_url: "https://www.doosanbears.com/ticket/reservation",
    },
    Team {
        code: "KT",
        full_name: "KT 위즈",
        color: "#000000",
        rank: 5,
        win_rate: 0.507,
        games_behind: 16.0,
        ticket_url: "https://www.ktwiz.co.kr/ticket/reservation",
    },
    Team {
        code: "SSG",
        full_name: "SSG 랜더스",
        color: "#CE0E2D",
        rank: 6,
        win_rate: 0.507,
        games_behind: 16.0,
        ticket_url: "https://www.ssglanders.com/ticket/reservation",
    },
    Team {
        code: "LOTTE",
        full_name: "롯데 자이언츠",
        color: "#041E42",
        rank: 7,
        win_rate: 0.471,
        games_behind: 21.0,
        ticket_url: "https://www.giantsclub.com/html/?pcode=1041",
    },
    Team {
        code: "HANWHA",
        full_name: "한화 이글스",
        color: "#FC4E00",
        rank: 8,
        win_rate: 0.465,
        games_behind: 22.0,
        ticket_url: "https://www.hanwhaeagles.co.kr/TI/TI_0101.do",
    },
    Team {
        code: "NC",
        full_name: "NC 다이노스",
        color: "#315288",
        rank: 9,
        win_rate: 0.437,
        games_behind: 26.0,
        ticket_url: "https://www.ncdinos.com/auth/ticket.do",
    },
    Team {
        code: "KIWOOM",
        full_name: "키움 히어로즈",
        color: "#570514",
        rank: 10,
        win_rate: 0.403,
        games_behind: 31.0,
        ticket_url: "https://www.heroesbaseball.co.kr/games/ticket/info.do",
    },
];

pub fn by_code(code: &str) -> Option<&'static Team> {
    TEAMS.iter().find(|t| t.code.eq_ignore_ascii_case(code))
}

/// A club that no longer plays under this name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendTeam {
    pub code: &'static str,
    pub full_name: &'static str,
    pub color: &'static str,
    pub seasons: &'static str,
}

pub const LEGEND_TEAMS: &[LegendTeam] = &[
    LegendTeam {
        code: "HAITAI",
        full_name: "해태 타이거즈",
        color: "#E60012",
        seasons: "1982-2001",
    },
    LegendTeam {
        code: "MBC",
        full_name: "MBC 청룡",
        color: "#1F3D7A",
        seasons: "1982-1989",
    },
    LegendTeam {
        code: "OB",
        full_name: "OB 베어스",
        color: "#0A1F44",
        seasons: "1982-1998",
    },
    LegendTeam {
        code: "BINGGRAE",
        full_name: "빙그레 이글스",
        color: "#F37321",
        seasons: "1986-1993",
    },
    LegendTeam {
        code: "SAMMI",
        full_name: "삼미 슈퍼스타즈",
        color: "#2B5BA8",
        seasons: "1982-1985",
    },
    LegendTeam {
        code: "CHUNGBO",
        full_name: "청보 핀토스",
        color: "#4A7B3C",
        seasons: "1985-1987",
    },
    LegendTeam {
        code: "PACIFIC",
        full_name: "태평양 돌핀스",
        color: "#00A0C6",
        seasons: "1988-1995",
    },
    LegendTeam {
        code: "HYUNDAI",
        full_name: "현대 유니콘스",
        color: "#F5A200",
        seasons: "1996-2007",
    },
    LegendTeam {
        code: "SSANGBANGWOOL",
        full_name: "쌍방울 레이더스",
        color: "#D7282F",
        seasons: "1991-1999",
    },
    LegendTeam {
        code: "SK",
        full_name: "SK 와이번스",
        color: "#F0282D",
        seasons: "2000-2020",
    },
    LegendTeam {
        code: "NEXEN",
        full_name: "넥센 히어로즈",
        color: "#820024",
        seasons: "2010-2018",
    },
    LegendTeam {
        code: "WOORI",
        full_name: "우리 히어로즈",
        color: "#820024",
        seasons: "2008",
    },
];

pub fn legend_by_code(code: &str) -> Option<&'static LegendTeam> {
    LEGEND_TEAMS.iter().find(|t| t.code.eq_ignore_ascii_case(code))
}
