//! Relation-type tables for the JeuxDeMots lexical network
//!
//! Two distinct id sets live here: the relation types the classifier is
//! asked to predict (each backed by one corpus file), and the wider
//! allow-list of relation types whose mere presence on a term is an
//! informative signature feature.

/// Hyperonymy (r_isa), the source of the H signature block
pub const R_ISA: u32 = 6;

/// Potential information (r_infopot), the source of the SST signature block
pub const R_INFOPOT: u32 = 36;

/// Prefix of standardized semantic-type node names
pub const SEM_TAG_PREFIX: &str = "_INFO-SEM";

/// Classified relation labels and their JeuxDeMots relation-type ids
pub const RELATION_TYPES: [(&str, u32); 15] = [
    ("r_has_causatif", 42),
    ("r_has_property-1", 153),
    ("r_objetmatiere", 50),
    ("r_lieuorigine", 171),
    ("r_topic", 142),
    ("r_depict", 172),
    ("r_holo", 10),
    ("r_lieu", 15),
    ("r_processus_agent", 70),
    ("r_processus_patient", 76),
    ("r_processus_instr", 80),
    ("r_own-1", 121),
    ("r_quantificateur", 58),
    ("r_social_tie", 113),
    ("r_product_of", 54),
];

/// Relation-type ids whose presence/absence on a term is informative enough
/// to enter the TRT signature block
pub const TRT_RELATION_IDS: [u32; 27] = [
    6,   // r_isa
    8,   // r_hypo
    9,   // r_has_part
    10,  // r_holo
    13,  // r_agent
    14,  // r_patient
    15,  // r_lieu
    16,  // r_instr
    17,  // r_carac
    23,  // r_carac-1
    28,  // r_lieu-1
    30,  // r_lieu>action
    31,  // r_action>lieu
    42,  // r_has_causatif
    50,  // r_object>mater
    54,  // r_product_of
    58,  // r_quantificateur
    70,  // r_processus>agent
    76,  // r_processus>patient
    80,  // r_processus>instr
    113, // r_has_social_tie_with
    121, // r_own
    122, // r_own-1
    142, // r_has_topic
    153, // r_has_prop
    171, // r_lieu>origine
    172, // r_depict
];

/// Whether a relation-type id belongs in the TRT signature block
pub fn is_informative(id: u32) -> bool {
    TRT_RELATION_IDS.contains(&id)
}

/// JeuxDeMots relation-type id for a classified label, if it is one of the
/// classified relations
pub fn relation_id(label: &str) -> Option<u32> {
    RELATION_TYPES
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, id)| *id)
}

/// Human-readable display name for a relation label. Unknown labels are
/// displayed as-is.
pub fn display_name(label: &str) -> &str {
    match label {
        "r_has_causatif" => "Conséquence (Co)",
        "r_has_property-1" => "Caractérisation (Ca)",
        "r_objetmatiere" => "Matière (M)",
        "r_lieuorigine" => "Origine (O)",
        "r_topic" => "Topic (T)",
        "r_depict" => "Dépiction (D)",
        "r_holo" => "Holonymie (H)",
        "r_lieu" => "Lieu (L)",
        "r_processus_agent" => "Agent (A)",
        "r_processus_patient" => "Patient (P)",
        "r_processus_instr" => "Instrument (I)",
        "r_own-1" => "Possession (Po)",
        "r_quantificateur" => "Quantification (Q)",
        "r_social_tie" => "Lien social (LS)",
        "r_product_of" => "Auteur/Créateur (AC)",
        other => other,
    }
}
