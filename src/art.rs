//! Static glyph art
//!
//! Pure presentation data. Rows of one table are not required to share a
//! width; consumers measure the widest row.

/// A multi-row piece of glyph art (top row first)
pub type Art = &'static [&'static str];

/// Widest row of a piece of art, in cells
pub fn art_width(art: Art) -> usize {
    art.iter().map(|row| row.chars().count()).max().unwrap_or(0)
}

/// Number of rows in a piece of art
#[inline]
pub fn art_height(art: Art) -> usize {
    art.len()
}

pub const SUN: Art = &[
    r" \ | / ",
    r"-- O --",
    r" / | \ ",
];

pub const MOON: Art = &[
    r" .-. ",
    r"( @ )",
    r" '-' ",
];

pub const SNOWMAN: Art = &[
    r"  _  ",
    r" (o) ",
    r"(ooo)",
    r" /_\ ",
];

pub const SNOW_DRIFT: Art = &[
    r"  __  ",
    r"_/  \_",
];

pub const MOUNTAIN: Art = &[
    r"     /\     ",
    r"    /  \    ",
    r"   / /\ \   ",
    r"  / /  \ \  ",
    r" / /    \ \ ",
    r"/_/______\_\",
];

pub const SMALL_MOUNTAIN: Art = &[
    r"   /\   ",
    r"  /  \  ",
    r" /    \ ",
    r"/______\",
];

pub const PLAYER_RUN_1: Art = &[
    r" o>  ",
    r"/|\  ",
    r" |   ",
    r"/ \  ",
];

pub const PLAYER_RUN_2: Art = &[
    r" o>  ",
    r"/|\  ",
    r" |   ",
    r" /\  ",
];

pub const PLAYER_JUMP: Art = &[
    r" o>  ",
    r"<|\  ",
    r"/ \  ",
    r"     ",
];

/// Floating pose while in nirvana
pub const PLAYER_LOTUS: Art = &[
    r" o   ",
    r"\|/  ",
    r"/_\  ",
    r"| |  ",
];

pub const RAINBOW_EYE: Art = &[
    r"    .~~~~~.    ",
    r"   /   _   \   ",
    r"  |  ((@))  |  ",
    r"  |   \_/   |  ",
    r"   \_______/   ",
];

pub const ACID_FLASH: Art = &[
    r"    _    ____ ___ ____  ",
    r"   / \  / ___|_ _|  _ \ ",
    r"  / _ \| |    | || | | |",
    r" / ___ \ |___ | || |_| |",
    r"/_/   \_\____|___|____/ ",
];

pub const NIRVANA_FLASH: Art = &[
    r" _   _ ___ ______     ___    _   _    _    ",
    r"| \ | |_ _|  _ \ \   / / \  | \ | |  / \   ",
    r"|  \| || || |_) \ \ / / _ \ |  \| | / _ \  ",
    r"| |\  || ||  _ < \ V / ___ \| |\  |/ ___ \ ",
    r"|_| \_|___|_| \_\ \_/_/   \_\_| \_/_/   \_\",
];

pub const EASY_MOUND: Art = &[
    r"   ___   ",
    r"  /. .\  ",
    r" /. . .\ ",
    r"/_._._._\",
];

pub const EASY_TENT: Art = &[
    r"   /\   ",
    r"  /  \  ",
    r" / || \ ",
    r"/______\",
];

pub const EASY_LADDER: Art = &[
    r" [====] ",
    r" |    | ",
    r" [====] ",
    r" |    | ",
    r" [====] ",
];

pub const EASY_BARREL: Art = &[
    r" .----. ",
    r"(|    |)",
    r" |====| ",
    r"(|    |)",
    r" '----' ",
];

pub const BIRD: Art = &[
    r"   ___   ",
    r"\<(o  )>/",
    r"   ^^    ",
];

pub const COW: Art = &[
    r"   ^__^   ",
    r"  (oo)\_  ",
    r"  (__)\  )",
    r"   ||--|| ",
];

pub const HOUSE: Art = &[
    r"    /\    ",
    r"   /  \   ",
    r"  /    \  ",
    r" /______\ ",
    r" |  []  | ",
    r" | .__. | ",
    r" | |  | | ",
    r" |_|__|_| ",
];

pub const CACTUS: Art = &[
    r"   |   ",
    r"  \|/  ",
    r"   |   ",
    r"  \|   ",
    r"   |   ",
];

pub const SPIKE: Art = &[
    r" /\ /\ ",
    r"/\/\/\",
];

/// Full-width death screen backdrop
pub const GATES_OF_HELL: Art = &[
    r"                    A B A N D O N   A L L   H O P E                     ",
    r"                                                                        ",
    r"      )  (  )  (          ^ ^ ^ ^ ^ ^          )  (  )  (               ",
    r"     (    )(    )       ^  ^ ^ ^ ^ ^  ^       (    )(    )              ",
    r"      )  (  )  (       ^ ^ ^ ^ ^ ^ ^ ^ ^       )  (  )  (               ",
    r"    ___|    |___      /|             |\      ___|    |___               ",
    r"   /   |    |   \    / |   ) ( ) (   | \    /   |    |   \              ",
    r"  /    |    |    \  /  |  (     ) (  |  \  /    |    |    \             ",
    r" |     |    |     ||   | ) ( ) ( ) ( |   ||     |    |     |            ",
    r" |  ___|    |___  ||   |(    )(    )|   ||  ___|    |___  |            ",
    r" | |   |    |   | ||   | )  (  )  ( |   || |   |    |   | |            ",
    r" | |   |    |   | ||   |    ) (     |   || |   |    |   | |            ",
    r" | |   | /\ |   | ||   |  (    ) (  |   || |   | /\ |   | |            ",
    r" | |   |/  \|   | ||   |)  (  )  (  |   || |   |/  \|   | |            ",
    r" | |   |    |   | ||   |  ) (  ) (  |   || |   |    |   | |            ",
    r" | |___|    |___| ||   | (   )(   ) |   || |___|    |___| |            ",
    r" |/   /|    |\   \||  /|             |\  ||/   /|    |\   \|            ",
    r" /   / |    | \   \| / |             | \ |/   / |    | \   \            ",
    r"|   /  |    |  \   | /                \ |   /  |    |  \   |            ",
    r"|  /   | o  |   \  |/                  \|  /   |    |   \  |            ",
    r"| /   /|/|\|\   \ |                    | /   /|    |\   \ |            ",
    r"|/___/ | | | \___\|____________________|/___/ |    | \___\|            ",
];

pub const DEATH_PLAYER: Art = &[
    r" o ",
    r"/|\",
    r"/ \",
];

/// Glyph swaps applied over the whole frame at acid tier 2
pub const TRIP_GLYPHS: &[(char, char)] = &[
    ('o', '@'),
    ('O', '0'),
    ('|', '!'),
    ('/', '\\'),
    ('\\', '/'),
    ('_', '~'),
    ('-', '='),
    ('=', '-'),
    ('#', '%'),
    ('.', 'o'),
    ('^', 'v'),
    ('v', '^'),
    ('<', '>'),
    ('>', '<'),
    ('[', '{'),
    (']', '}'),
    ('(', '['),
    (')', ']'),
    ('{', '('),
    ('}', ')'),
    ('*', '+'),
    ('+', '*'),
    ('A', 'V'),
    ('V', 'A'),
    ('M', 'W'),
    ('W', 'M'),
    ('T', 'Y'),
    ('Y', 'T'),
];

/// The four interchangeable flat-top obstacle shapes
pub const EASY_VARIANTS: [Art; 4] = [EASY_MOUND, EASY_TENT, EASY_LADDER, EASY_BARREL];

/// Look up the trip-mode replacement for a glyph
pub fn trip_glyph(glyph: char) -> Option<char> {
    TRIP_GLYPHS
        .iter()
        .find(|(from, _)| *from == glyph)
        .map(|(_, to)| *to)
}
