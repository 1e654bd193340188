use crate::figure::figure_table;
use core_types::Polarity;

figure_table! {
    /// The sixteen figures of geomancy. Lines read from the head (first) to the feet (last).
    pub enum GeomanticFigure (4 lines, "geomantic figure") {
        Populus = ("Populus", 0b0000),
        Via = ("Via", 0b1111),
        CaudaDraconis = ("Cauda Draconis", 0b1110),
        CaputDraconis = ("Caput Draconis", 0b0111),
        Puer = ("Puer", 0b1101),
        Puella = ("Puella", 0b1011),
        FortunaMinor = ("Fortuna Minor", 0b1100),
        FortunaMajor = ("Fortuna Major", 0b0011),
        Conjunctio = ("Conjunctio", 0b0110),
        Carcer = ("Carcer", 0b1001),
        Acquisitio = ("Acquisitio", 0b0101),
        Amissio = ("Amissio", 0b1010),
        Laetitia = ("Laetitia", 0b1000),
        Tristitia = ("Tristitia", 0b0001),
        Rubeus = ("Rubeus", 0b0100),
        Albus = ("Albus", 0b0010),
    }
}

impl GeomanticFigure {
    /// The yin/yang nature of the figure, independent of house.
    pub fn nature(self) -> Polarity {
        use GeomanticFigure::*;
        match self {
            Puer | Amissio | Albus | Populus | FortunaMajor | Conjunctio | Tristitia | CaudaDraconis => {
                Polarity::Bearish
            }
            Puella | Acquisitio | Rubeus | Via | FortunaMinor | Carcer | Laetitia | CaputDraconis => {
                Polarity::Bullish
            }
        }
    }
}
