use std::fmt;
use std::str::FromStr;

/// The two UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    De,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::De, Locale::En];

    /// Two-letter code, also used as the document language.
    pub fn code(self) -> &'static str {
        match self {
            Locale::De => "de",
            Locale::En => "en",
        }
    }

    pub fn toggled(self) -> Locale {
        match self {
            Locale::De => Locale::En,
            Locale::En => Locale::De,
        }
    }

    pub fn translations(self) -> &'static Translations {
        match self {
            Locale::De => &DE,
            Locale::En => &EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" => Ok(Locale::De),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported language '{other}' (expected de or en)")),
        }
    }
}

/// Display strings for one locale. `description` and `disclaimer` carry
/// limited markup, see [`crate::parse_markup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translations {
    pub title: &'static str,
    pub description: &'static str,
    pub courses_label: &'static str,
    pub courses_placeholder: &'static str,
    pub semester_label: &'static str,
    pub submit_button: &'static str,
    pub disclaimer: &'static str,
    pub imprint_link: &'static str,
    pub privacy_link: &'static str,
    pub loading_message: &'static str,
    pub rate_limit_message: &'static str,
}

static DE: Translations = Translations {
    title: "u:plan",
    description: "Erstelle ICS-Feeds für Deine Lehrveranstaltungen ohne Verletzung der <a href='https://ufind.univie.ac.at/de/help.html#disclaimer'>u:find Nutzungsbedingungen</a>. Diese Feeds können zu den meisten Kalendern wie iOS Kalender oder Google Kalender hinzugefügt werden und halten Deinen Zeitplan immer aktuell.",
    courses_label: "Lehrveranstaltungen",
    courses_placeholder: "IDs durch Beistrich getrennt, z.B. 051011,051012-3,051131-5",
    semester_label: "Semester",
    submit_button: "ICS-Feed erstellen",
    disclaimer: "<strong>Haftungsausschluss:</strong> Diese Anwendung wird nicht von der Universität Wien bereitgestellt. Die Universität Wien übernimmt keine Verantwortung für die Datengenauigkeit und haftet nicht für etwaige Schäden, die Nutzern oder Dritten im Zusammenhang mit der Nutzung dieser Daten entstehen.",
    imprint_link: "Impressum",
    privacy_link: "Datenschutz",
    loading_message: "Dein ICS-Feed wird generiert, das kann einige Sekunden dauern...",
    rate_limit_message: "Zu viele Anfragen. Bitte versuche es später erneut.",
};

static EN: Translations = Translations {
    title: "u:plan",
    description: "Create automatically updating ICS feeds for your courses without violating the <a href='https://ufind.univie.ac.at/en/help.html#disclaimer'>u:find terms</a>. These feeds can be easily added to any calendar app like iOS Calendar or Google Calendar, keeping your schedule always up to date.",
    courses_label: "Course IDs",
    courses_placeholder: "Comma-separated e.g.,  051011,051012-3,051131-5",
    semester_label: "Semester",
    submit_button: "Create ICS Feed",
    disclaimer: "<strong>Disclaimer:</strong> This application is not provided by the University of Vienna. The University of Vienna assumes no responsibility for data accuracy and is not liable for any damages incurred by users or third parties in connection with the use of this data.",
    imprint_link: "Imprint",
    privacy_link: "Data Privacy",
    loading_message: "Generating your ICS feed, this might take a few seconds...",
    rate_limit_message: "Too many requests. Please try again later.",
};
