use serde::Serialize;

/// Experience entry shown next to a tree content panel.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TreeEntry {
    pub slot: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
}

/// Project card shown above a hovered workshop blueprint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WorkshopEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
}

/// Skill name to icon path served next to the site.
pub const SKILL_ICONS: &[(&str, &str)] = &[
    ("Python", "static/icons/python.png"),
    ("TypeScript", "static/icons/typescript.png"),
    ("React", "static/icons/react.png"),
    ("AI", "static/icons/science.png"),
    ("REST API", "static/icons/api.png"),
    ("Next.js", "static/icons/nextjs.png"),
];

pub const TREE_ENTRIES: &[TreeEntry] = &[
    TreeEntry {
        slot: 1,
        title: "Storm Gray Unit – Junior Frontend Developer",
        description: "Developed React-based admin dashboards for IoT management. Collaborated on REST API design to ensure seamless data flow.",
        skills: &["React", "REST API"],
    },
    TreeEntry {
        slot: 2,
        title: "CeboTech – Python Developer",
        description: "Contributed to AI-driven applications. REST API design. Domain-driven architecture. Focused on clean design and scalable solutions.",
        skills: &["Python", "AI", "REST API"],
    },
    TreeEntry {
        slot: 3,
        title: "Anfata Games – Full Stack Developer",
        description: "Enhanced application performance and load times. Fixed critical bugs and improved overall code stability",
        skills: &["Next.js", "TypeScript", "React"],
    },
    TreeEntry {
        slot: 4,
        title: "RTB House – TypeScript Developer",
        description: "AI-focused data pipelines and REST APIs (Python & GCP). Built tracking scripts, crawlers, and reporting tools. Solved complex technical issues.",
        skills: &["Python", "TypeScript", "AI"],
    },
];

pub const WORKSHOP_ENTRIES: &[WorkshopEntry] = &[
    WorkshopEntry {
        id: "BlueprintContent1",
        title: "Project 1",
        description: "Coming soon - exciting project in development",
        technologies: &[],
    },
    WorkshopEntry {
        id: "BlueprintContent2",
        title: "Pixel Art Editor",
        description: "A web-based pixel art creation tool with many available tools",
        technologies: &["TypeScript", "React", "Canvas API"],
    },
    WorkshopEntry {
        id: "BlueprintContent3",
        title: "Telecom Website",
        description: "Website for telecommunications company with modern design and responsive layout",
        technologies: &["Next.js", "Tailwind CSS", "TypeScript"],
    },
    WorkshopEntry {
        id: "BlueprintContent4",
        title: "Chess Game",
        description: "Interactive chess game built with vanilla JavaScript",
        technologies: &["JavaScript", "HTML", "CSS"],
    },
];

pub fn tree_entry(slot: u8) -> Option<&'static TreeEntry> {
    TREE_ENTRIES.iter().find(|e| e.slot == slot)
}

pub fn workshop_entry(id: &str) -> Option<&'static WorkshopEntry> {
    WORKSHOP_ENTRIES.iter().find(|e| e.id == id)
}

pub fn skill_icon(skill: &str) -> Option<&'static str> {
    SKILL_ICONS
        .iter()
        .find(|(name, _)| *name == skill)
        .map(|(_, path)| *path)
}

/// Description split into the bullet points shown in the tree overlay.
pub fn description_points(description: &str) -> impl Iterator<Item = &str> {
    description.split(". ").filter(|point| !point.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tree_slot_has_an_entry_with_known_skills() {
        for slot in 1..=crate::roles::CONTENT_SLOTS {
            let entry = tree_entry(slot).unwrap();
            assert!(entry.skills.iter().all(|s| skill_icon(s).is_some()));
        }
    }

    #[test]
    fn description_points_split_on_sentences() {
        let points: Vec<_> = description_points(tree_entry(2).unwrap().description).collect();
        assert_eq!(points.len(), 4);
        assert_eq!(points[1], "REST API design");
    }
}
