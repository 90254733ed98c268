//! Daily inspiration.
//!
//! A fixed list of short passages. The passage for a date depends only on the
//! date's ordinal day of year, so every view of a given day shows the same one.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InspirationKind {
    Quran,
    Hadith,
    Quote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Inspiration {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: InspirationKind,
    pub content: &'static str,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<&'static str>,
}

pub const INSPIRATIONS: [Inspiration; 15] = [
    Inspiration {
        id: 1,
        kind: InspirationKind::Quran,
        content: "وَمَن يَتَّقِ اللَّهَ يَجْعَل لَّهُ مَخْرَجًا",
        source: "Quran 65:2",
        translation: Some("And whoever fears Allah - He will make for him a way out."),
    },
    Inspiration {
        id: 2,
        kind: InspirationKind::Hadith,
        content: "لَيْسَ الْمُؤْمِنُ الَّذِي يَشْبَعُ وَجَارُهُ جَائِعٌ إِلَى جَنْبِهِ",
        source: "Al-Adab Al-Mufrad",
        translation: Some("The believer is not one who eats his fill while his neighbor goes hungry."),
    },
    Inspiration {
        id: 3,
        kind: InspirationKind::Quran,
        content: "وَأَن لَّيْسَ لِلْإِنسَانِ إِلَّا مَا سَعَىٰ",
        source: "Quran 53:39",
        translation: Some("And that there is nothing for man except what he strives for."),
    },
    Inspiration {
        id: 4,
        kind: InspirationKind::Hadith,
        content: "لَيْسَ مِنَّا مَنْ لَمْ يَرْحَمْ صَغِيرَنَا وَيُوَقِّرْ كَبِيرَنَا",
        source: "Abu Dawud and Tirmidhi",
        translation: Some("He is not of us who does not show mercy to our young ones and does not acknowledge the honor due to our elders."),
    },
    Inspiration {
        id: 5,
        kind: InspirationKind::Quran,
        content: "وَمَا تَوْفِيقِي إِلَّا بِاللَّهِ ۚ عَلَيْهِ تَوَكَّلْتُ وَإِلَيْهِ أُنِيبُ",
        source: "Quran 11:88",
        translation: Some("And my success is not but through Allah. Upon Him I have relied, and to Him I return."),
    },
    Inspiration {
        id: 6,
        kind: InspirationKind::Quran,
        content: "فَإِنَّ مَعَ الْعُسْرِ يُسْرًا ۝ إِنَّ مَعَ الْعُسْرِ يُسْرًا",
        source: "Quran 94:6",
        translation: Some("For indeed, with hardship [will be] ease. Indeed, with hardship [will be] ease."),
    },
    Inspiration {
        id: 7,
        kind: InspirationKind::Hadith,
        content: "إِنَّمَا الْأَعْمَالُ بِالنِّيَّاتِ وَإِنَّمَا لِكُلِّ امْرِئٍ مَا نَوَى",
        source: "Sahih al-Bukhari",
        translation: Some("Actions are but by intention, and every man shall have only that which he intended."),
    },
    Inspiration {
        id: 8,
        kind: InspirationKind::Quran,
        content: "وَلَسَوْفَ يُعْطِيكَ رَبُّكَ فَتَرْضَىٰ",
        source: "Quran 93:5",
        translation: Some("And your Lord is going to give you, and you will be satisfied."),
    },
    Inspiration {
        id: 9,
        kind: InspirationKind::Hadith,
        content: "لاَ يُؤْمِنُ أَحَدُكُمْ حَتَّى يُحِبَّ لأَخِيهِ مَا يُحِبُّ لِنَفْسِهِ",
        source: "Sahih al-Bukhari",
        translation: Some("None of you will believe until you love for your brother what you love for yourself."),
    },
    Inspiration {
        id: 10,
        kind: InspirationKind::Quran,
        content: "لَا يُكَلِّفُ اللَّهُ نَفْسًا إِلَّا وُسْعَهَا ۚ لَهَا مَا كَسَبَتْ وَعَلَيْهَا مَا اكْتَسَبَتْ",
        source: "Quran 2:286",
        translation: Some("Allah does not charge a soul except [with that within] its capacity. For it is what [good] it has earned, and against it is what [evil] it has earned."),
    },
    Inspiration {
        id: 11,
        kind: InspirationKind::Hadith,
        content: "خَيْرُكُمْ خَيْرُكُمْ لأَهْلِهِ وَأَنَا خَيْرُكُمْ لأَهْلِي",
        source: "Tirmidhi",
        translation: Some("The best among you are those who are best to their families, and I am the best among you to my family."),
    },
    Inspiration {
        id: 12,
        kind: InspirationKind::Quran,
        content: "فَبِأَيِّ آلَاءِ رَبِّكُمَا تُكَذِّبَانِ",
        source: "Quran 55:13",
        translation: Some("So which of the favors of your Lord would you deny?"),
    },
    Inspiration {
        id: 13,
        kind: InspirationKind::Hadith,
        content: "لَيْسَ الشَّدِيدُ بِالصُّرَعَةِ، إِنَّمَا الشَّدِيدُ الَّذِي يَمْلِكُ نَفْسَهُ عِنْدَ الْغَضَبِ",
        source: "Sahih al-Bukhari and Sahih Muslim",
        translation: Some("The strong person is not the one who can overpower others. The strong person is the one who controls himself when he is angry."),
    },
    Inspiration {
        id: 14,
        kind: InspirationKind::Quran,
        content: "وَعَسَىٰ أَن تَكْرَهُوا شَيْئًا وَهُوَ خَيْرٌ لَّكُمْ ۖ وَعَسَىٰ أَن تُحِبُّوا شَيْئًا وَهُوَ شَرٌّ لَّكُمْ",
        source: "Quran 2:216",
        translation: Some("But perhaps you hate a thing and it is good for you; and perhaps you love a thing and it is bad for you."),
    },
    Inspiration {
        id: 15,
        kind: InspirationKind::Hadith,
        content: "أَحَبُّ الأَعْمَالِ إِلَى اللَّهِ أَدْوَمُهَا وَإِنْ قَلَّ",
        source: "Sahih al-Bukhari and Muslim",
        translation: Some("Verily, the most beloved of deeds to Allah are the most consistent, even if they are few."),
    },
];

/// Passage shown on `date`: `INSPIRATIONS[day_of_year % len]`, day 1 being
/// January 1st.
pub fn for_date(date: NaiveDate) -> &'static Inspiration {
    let index = date.ordinal() as usize % INSPIRATIONS.len();
    &INSPIRATIONS[index]
}
