//! Static owner profile shown in the sidebar and intro.

#[derive(Debug, Clone, Copy)]
pub struct Skill {
    pub name: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub name: &'static str,
    pub first_name: &'static str,
    pub role: &'static str,
    pub tagline: &'static str,
    pub skills: &'static [Skill],
}

pub const OWNER: Profile = Profile {
    name: "Malleswara Reddy",
    first_name: "Malleswara",
    role: "Data Analyst",
    tagline: "Transforming raw data into impactful insights to support decision-making and business growth.",
    skills: &[
        Skill {
            name: "SQL",
            detail: "Data querying and manipulation",
        },
        Skill {
            name: "Power BI",
            detail: "Interactive dashboards & visualizations",
        },
        Skill {
            name: "Tableau",
            detail: "Business storytelling with data",
        },
        Skill {
            name: "Python",
            detail: "Data analysis, Pandas, NumPy, matplotlib",
        },
        Skill {
            name: "Machine Learning",
            detail: "Basic models and use-cases",
        },
        Skill {
            name: "Excel",
            detail: "Formulas, pivot tables, and automation",
        },
    ],
};
