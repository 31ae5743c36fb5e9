//! Keyword dictionaries for skill and certification rankings.
//!
//! Keys are matched as lower-case substrings of `title + description`; the
//! second element is the label reported in rankings.

pub const SKILL_KEYWORDS: &[(&str, &str)] = &[
    ("testing", "Testing"),
    ("inspection", "Inspection"),
    ("fault finding", "Fault finding"),
    ("installation", "Installation"),
    ("maintenance", "Maintenance"),
    ("commissioning", "Commissioning"),
    ("design", "Design"),
    ("plc", "PLC"),
    ("solar", "Solar PV"),
    ("ev charging", "EV charging"),
    ("fire alarm", "Fire alarms"),
    ("data cabling", "Data cabling"),
    ("containment", "Containment"),
    ("three phase", "Three phase"),
    ("rewire", "Rewires"),
];

pub const CERTIFICATION_KEYWORDS: &[(&str, &str)] = &[
    ("18th edition", "18th Edition (BS 7671)"),
    ("2391", "C&G 2391 Inspection & Testing"),
    ("2394", "C&G 2394 Initial Verification"),
    ("2395", "C&G 2395 Periodic Inspection"),
    ("am2", "AM2 Assessment"),
    ("ecs card", "ECS Card"),
    ("jib", "JIB Grading"),
    ("cscs", "CSCS Card"),
    ("nvq", "NVQ Level 3"),
    ("ipaf", "IPAF"),
    ("pasma", "PASMA"),
    ("smsts", "SMSTS"),
    ("sssts", "SSSTS"),
];
