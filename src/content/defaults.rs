//! Built-in content used until the admin stores something else.

use super::{Concept, Icon, JourneyEntry, Project, SkillGroup};

/// A category tab that ships with the site.
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// Label shown in the navigation bar.
    pub tab: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color_theme: &'static str,
    pub storage_key: &'static str,
    pub concepts: &'static [(&'static str, &'static str, &'static str)],
}

impl BuiltinCategory {
    pub fn concepts(&self) -> Vec<Concept> {
        self.concepts
            .iter()
            .map(|(title, desc, icon)| Concept {
                title: title.to_string(),
                desc: desc.to_string(),
                icon: Icon::builtin(icon),
            })
            .collect()
    }

    /// Projects shown (and seeded) before anything is stored for this tab.
    pub fn initial_projects(&self) -> Vec<Project> {
        match self.storage_key {
            "se_projects" => vec![
                project(
                    "se1",
                    "Travel Path",
                    "Itinerary Planner",
                    "An intelligent travel planner leveraging dynamic routing algorithms and integrated mapping APIs to calculate and visually optimize travel paths in real-time.",
                    &["React", "Node.js", "Maps API"],
                    "https://github.com/adityapatil-2026/travel-path",
                ),
                project(
                    "se2",
                    "React Dashboard",
                    "Enterprise App",
                    "A high-performance scalable dashboard interfacing with robust microservices. Features real-time state management, secure auth flows, and dense data visualizations.",
                    &["React", "Express", "PostgreSQL"],
                    "https://github.com/adityapatil-2026/react-dashboard",
                ),
            ],
            "de_projects" => vec![project(
                "de1",
                "Hazard-KG",
                "Capstone Project",
                "Engineered a comprehensive graph architecture to process and mathematically structure vast amounts of disparate threat intelligence. This pipeline creates rapid correlating nodes and AI-driven insights for automated, multi-dimensional risk analysis.",
                &["Neo4j", "Python", "AI-as-a-Service", "Data Engineering"],
                "https://github.com/adityapatil-2026/hazard-kg",
            )],
            _ => Vec::new(),
        }
    }
}

pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        tab: "Product Management",
        title: "Product Management",
        description: "Driving product strategy, agile execution, and cross-functional leadership.",
        icon: "line-chart",
        color_theme: "blue",
        storage_key: "pm_projects",
        concepts: &[
            ("Product Strategy", "", "target"),
            ("Agile Execution", "", "activity"),
            ("User Research", "", "users"),
            ("Data Driven", "", "line-chart"),
        ],
    },
    BuiltinCategory {
        tab: "AI",
        title: "Artificial Intelligence",
        description: "Designing autonomous agents, LLM integrations, and intelligent systems.",
        icon: "bot",
        color_theme: "purple",
        storage_key: "ai_projects",
        concepts: &[
            ("LLMs", "Fine-tuning & Prompt Engineering", "bot"),
            ("Agents", "Autonomous Task Execution", "cpu"),
            ("RAG", "Retrieval-Augmented Generation", "database"),
        ],
    },
    BuiltinCategory {
        tab: "Software Engineering",
        title: "Software Engineering",
        description: "Architecting highly dynamic user interfaces and scalable background services.",
        icon: "code",
        color_theme: "cyan",
        storage_key: "se_projects",
        concepts: &[
            ("React", "Dynamic UIs, Framer Motion, and Complex State Management.", "box"),
            ("Node.js", "High-performance scalable Backends, Express, and APIs.", "globe"),
            ("Full-Stack", "End-to-End Architecture connecting rich clients to robust data systems.", "server"),
        ],
    },
    BuiltinCategory {
        tab: "Data Engineering",
        title: "Data Engineering",
        description: "Building highly complex graphs, intelligent data pipelines, and integrating ML.",
        icon: "database",
        color_theme: "red",
        storage_key: "de_projects",
        concepts: &[
            ("Neo4j", "Graph DB & Path Algorithms", "activity"),
            ("Graphs", "Complex Relationship Mapping", "target"),
            ("Pipelines", "ETL & Streaming Arch", "database"),
        ],
    },
    BuiltinCategory {
        tab: "adiicodes",
        title: "adiicodes",
        description: "Personal experiments, algorithmic patterns, and open-source contributions.",
        icon: "/static/adiicodes.png",
        color_theme: "emerald",
        storage_key: "adii_projects",
        concepts: &[
            ("Algorithms", "", "terminal"),
            ("Open Source", "", "github"),
            ("Experiment", "", "code"),
        ],
    },
];

pub fn builtin_category(storage_key: &str) -> Option<&'static BuiltinCategory> {
    BUILTIN_CATEGORIES
        .iter()
        .find(|c| c.storage_key == storage_key)
}

fn project(id: &str, title: &str, tag: &str, desc: &str, tags: &[&str], link: &str) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        tag: tag.to_string(),
        desc: desc.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        link: link.to_string(),
    }
}

pub fn arsenal() -> Vec<SkillGroup> {
    let group = |id: &str, title: &str, icon: &str, skills: &[&str]| SkillGroup {
        id: id.to_string(),
        title: title.to_string(),
        icon: Icon::parse(icon),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    };

    vec![
        group(
            "a1",
            "AI/ML & Concepts",
            "https://img.icons8.com/color/48/artificial-intelligence.png",
            &[
                "PyTorch", "TensorFlow", "Scikit-Learn", "LLMs", "LangChain", "RAG", "Agentic AI",
                "Hugging Face", "Vector DBs", "MLOps", "OOP", "System Design",
            ],
        ),
        group(
            "a2",
            "Programming",
            "https://img.icons8.com/color/48/source-code.png",
            &["Go", "Python", "Java", "JavaScript", "SQL", "C/C++", "TypeScript"],
        ),
        group(
            "a3",
            "Frameworks & DevOps",
            "https://img.icons8.com/color/48/settings--v1.png",
            &[
                "Kubernetes", "Docker", "Terraform", "Helm", "FastAPI", "React", "Node.js",
                "Next.js", "Express", "Celery", "Redis",
            ],
        ),
        group(
            "a4",
            "Databases & Systems",
            "https://img.icons8.com/color/48/database.png",
            &[
                "PostgreSQL", "Oracle DB", "MS SQL Server", "MongoDB", "Elasticsearch", "Kafka",
                "Spark", "MinIO",
            ],
        ),
        group(
            "a5",
            "Cloud & Infra",
            "https://img.icons8.com/color/48/cloud.png",
            &["AWS", "Azure", "GCP", "Linux"],
        ),
        group(
            "a6",
            "Monitoring & SRE",
            "https://img.icons8.com/color/48/line-chart.png",
            &["Prometheus", "Grafana", "CloudWatch", "JMeter", "Testing", "CI/CD"],
        ),
    ]
}

pub fn journey() -> Vec<JourneyEntry> {
    fn entry(
        id: &str,
        role: &str,
        period: &str,
        company: &str,
        description: &str,
        color: &str,
        icon: &str,
    ) -> JourneyEntry {
        JourneyEntry {
            id: id.to_string(),
            role: role.to_string(),
            period: period.to_string(),
            company: company.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            icon: Icon::builtin(icon),
        }
    }

    vec![
        entry(
            "j1",
            "Summer Intern",
            "2025 - Present",
            "Cohesity Inc.",
            "Gained hands-on experience in a fast-paced tech environment, contributing to key projects and learning from industry professionals.",
            "cyan",
            "briefcase",
        ),
        entry(
            "j2",
            "MS Software Eng.",
            "2024 - 2026",
            "Arizona State Univ.",
            "Pursuing a Master's degree to deepen my expertise in advanced software engineering principles and practices.",
            "purple",
            "graduation",
        ),
        entry(
            "j3",
            "IT Apps Specialist",
            "2023 - 2024",
            "Veritas Technologies",
            "Transitioned from an intern role to a specialist, working on internal applications and gaining experience in enterprise software.",
            "rose",
            "briefcase",
        ),
        entry(
            "j4",
            "B.E Computer Eng.",
            "2019 - 2023",
            "Pune University",
            "Completed my Bachelor's degree, where I built a strong foundation in computer science and software development.",
            "yellow",
            "graduation",
        ),
    ]
}
