//! Minimal localization service.
//!
//! Messages are keyed like the frontend translation files and use `%{name}`
//! placeholders for substitutions. Lookups fall back to English before
//! reporting a missing translation.

pub const DEFAULT_LOCALE: &str = "en";

type Table = &'static [(&'static str, &'static str)];

const EN: Table = &[
    ("js.boards.error_attribute_not_writable", "The work package cannot be moved to this list. The attribute %{attribute} is not writable."),
    ("js.boards.error_loading_the_list", "Error while loading the list: %{error_message}"),
    ("js.boards.add_list_modal.warning.assignee", "There is currently no member in this project that can be added as a list."),
    ("js.boards.version.lock_version", "Lock version"),
    ("js.boards.version.unlock_version", "Unlock version"),
    ("js.boards.version.close_version", "Close version"),
    ("js.boards.version.open_version", "Open version"),
    ("js.boards.version.locked", "Locked"),
    ("js.boards.version.closed", "Closed"),
    ("js.work_packages.properties.status", "Status"),
    ("js.work_packages.properties.version", "Version"),
    ("js.work_packages.properties.assignee", "Assignee"),
    ("default_role_manager", "Manager"),
    ("default_role_developer", "Developer"),
    ("default_role_reporter", "Reporter"),
    ("default_type_task", "Task"),
    ("default_type_milestone", "Milestone"),
    ("default_type_phase", "Phase"),
    ("default_type_feature", "Feature"),
    ("default_type_bug", "Bug"),
    ("default_status_new", "New"),
    ("default_status_in_progress", "In progress"),
    ("default_status_resolved", "Resolved"),
    ("default_status_feedback", "Feedback"),
    ("default_status_closed", "Closed"),
    ("default_status_rejected", "Rejected"),
    ("default_priority_low", "Low"),
    ("default_priority_normal", "Normal"),
    ("default_priority_high", "High"),
    ("default_priority_urgent", "Urgent"),
    ("default_priority_immediate", "Immediate"),
    ("default_activity_management", "Management"),
    ("default_activity_design", "Design"),
    ("default_activity_development", "Development"),
    ("default_activity_testing", "Testing"),
];

const DE: Table = &[
    ("js.boards.error_attribute_not_writable", "Das Arbeitspaket kann nicht in diese Liste verschoben werden. Das Attribut %{attribute} ist nicht beschreibbar."),
    ("js.boards.error_loading_the_list", "Fehler beim Laden der Liste: %{error_message}"),
    ("js.boards.add_list_modal.warning.assignee", "Es gibt derzeit kein Mitglied in diesem Projekt, das als Liste hinzugefügt werden kann."),
    ("js.boards.version.lock_version", "Version sperren"),
    ("js.boards.version.unlock_version", "Version entsperren"),
    ("js.boards.version.close_version", "Version schließen"),
    ("js.boards.version.open_version", "Version öffnen"),
    ("js.boards.version.locked", "Gesperrt"),
    ("js.boards.version.closed", "Geschlossen"),
    ("js.work_packages.properties.status", "Status"),
    ("js.work_packages.properties.version", "Version"),
    ("js.work_packages.properties.assignee", "Zugewiesen an"),
    ("default_role_manager", "Manager"),
    ("default_role_developer", "Entwickler"),
    ("default_role_reporter", "Reporter"),
    ("default_type_task", "Aufgabe"),
    ("default_type_milestone", "Meilenstein"),
    ("default_type_phase", "Phase"),
    ("default_type_feature", "Feature"),
    ("default_type_bug", "Fehler"),
    ("default_status_new", "Neu"),
    ("default_status_in_progress", "In Bearbeitung"),
    ("default_status_resolved", "Gelöst"),
    ("default_status_feedback", "Feedback"),
    ("default_status_closed", "Geschlossen"),
    ("default_status_rejected", "Abgewiesen"),
    ("default_priority_low", "Niedrig"),
    ("default_priority_normal", "Normal"),
    ("default_priority_high", "Hoch"),
    ("default_priority_urgent", "Dringend"),
    ("default_priority_immediate", "Sofort"),
    ("default_activity_management", "Management"),
    ("default_activity_design", "Design"),
    ("default_activity_development", "Entwicklung"),
    ("default_activity_testing", "Testen"),
];

const FR: Table = &[
    ("js.boards.error_attribute_not_writable", "Le lot de travaux ne peut pas être déplacé dans cette liste. L'attribut %{attribute} n'est pas modifiable."),
    ("js.boards.error_loading_the_list", "Erreur lors du chargement de la liste : %{error_message}"),
    ("js.boards.add_list_modal.warning.assignee", "Il n'y a actuellement aucun membre dans ce projet pouvant être ajouté comme liste."),
    ("js.boards.version.lock_version", "Verrouiller la version"),
    ("js.boards.version.unlock_version", "Déverrouiller la version"),
    ("js.boards.version.close_version", "Fermer la version"),
    ("js.boards.version.open_version", "Ouvrir la version"),
    ("js.boards.version.locked", "Verrouillée"),
    ("js.boards.version.closed", "Fermée"),
    ("js.work_packages.properties.status", "Statut"),
    ("js.work_packages.properties.version", "Version"),
    ("js.work_packages.properties.assignee", "Assigné à"),
    ("default_role_manager", "Manager"),
    ("default_role_developer", "Développeur"),
    ("default_role_reporter", "Rapporteur"),
    ("default_type_task", "Tâche"),
    ("default_type_milestone", "Jalon"),
    ("default_type_phase", "Phase"),
    ("default_type_feature", "Fonctionnalité"),
    ("default_type_bug", "Anomalie"),
    ("default_status_new", "Nouveau"),
    ("default_status_in_progress", "En cours"),
    ("default_status_resolved", "Résolu"),
    ("default_status_feedback", "Commentaire"),
    ("default_status_closed", "Fermé"),
    ("default_status_rejected", "Rejeté"),
    ("default_priority_low", "Bas"),
    ("default_priority_normal", "Normal"),
    ("default_priority_high", "Haut"),
    ("default_priority_urgent", "Urgent"),
    ("default_priority_immediate", "Immédiat"),
    ("default_activity_management", "Gestion"),
    ("default_activity_design", "Conception"),
    ("default_activity_development", "Développement"),
    ("default_activity_testing", "Test"),
];

fn table(locale: &str) -> Option<Table> {
    match locale {
        "en" => Some(EN),
        "de" => Some(DE),
        "fr" => Some(FR),
        _ => None,
    }
}

/// Locales with a complete translation table
pub fn valid_languages() -> Vec<&'static str> {
    vec!["en", "de", "fr"]
}

pub fn is_valid_language(locale: &str) -> bool {
    table(locale).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18n {
    locale: String,
}

impl I18n {
    /// Unknown locales are kept; lookups then fall back to English
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        let find = |table: Table| {
            table
                .iter()
                .find(|(candidate, _)| *candidate == key)
                .map(|(_, text)| *text)
        };

        table(&self.locale)
            .and_then(find)
            .or_else(|| find(EN))
    }

    pub fn translate(&self, key: &str, substitutions: &[(&str, &str)]) -> String {
        let Some(template) = self.lookup(key) else {
            return format!("translation missing: {}.{}", self.locale, key);
        };

        substitutions
            .iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(&format!("%{{{}}}", name), value)
            })
    }

    pub fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}
