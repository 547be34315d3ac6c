use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::errors::InvokeError;

/// Marketplace listing tier for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Micro,
    Macro,
    Popular,
}

/// One cataloged, invocable agent. Catalog data is owned by the catalog
/// collaborator and read-only to the invocation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub price: f64,
    pub currency: String,
    pub rating: f64,
    pub total_uses: u32,
    pub author: String,
    pub category: Category,
    pub image: String,
    pub tags: Vec<String>,
    pub is_verified: bool,
    pub created_at: NaiveDate,
}

/// Read-only boundary to the agent catalog.
pub trait Catalog: Send + Sync {
    /// All listed agents, in catalog order.
    fn agents(&self) -> &[AgentProfile];

    /// Look an agent up by its catalog id.
    fn find(&self, id: &str) -> Option<&AgentProfile> {
        self.agents().iter().find(|agent| agent.id == id)
    }

    /// Like [`find`](Catalog::find), for callers that surface a miss as
    /// the not-found empty state.
    fn require(&self, id: &str) -> Result<&AgentProfile, InvokeError> {
        self.find(id)
            .ok_or_else(|| InvokeError::NotFound(id.to_string()))
    }
}

/// Catalog backed by an owned, fixed list of profiles.
pub struct StaticCatalog {
    agents: Vec<AgentProfile>,
}

impl StaticCatalog {
    pub fn new(agents: Vec<AgentProfile>) -> Self {
        Self { agents }
    }
}

impl Catalog for StaticCatalog {
    fn agents(&self) -> &[AgentProfile] {
        &self.agents
    }
}

fn listed(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid catalog date")
}

/// The seeded marketplace catalog used by the server, the CLI and tests.
pub fn builtin() -> StaticCatalog {
    StaticCatalog::new(vec![
        AgentProfile {
            id: "1".to_string(),
            name: "ResumeAI".to_string(),
            description: "AI-powered resume analyzer and optimizer for job seekers".to_string(),
            long_description: "ResumeAI uses advanced natural language processing to analyze resumes, identify areas for improvement, and suggest optimizations based on industry best practices. It can help you tailor your resume for specific job postings and increase your chances of getting hired.".to_string(),
            price: 0.05,
            currency: "ETH".to_string(),
            rating: 4.8,
            total_uses: 15420,
            author: "CareerTech Labs".to_string(),
            category: Category::Popular,
            image: "https://images.unsplash.com/photo-1586281380349-632531db7ed4?w=400&h=300&fit=crop&auto=format".to_string(),
            tags: vec!["career".to_string(), "AI".to_string(), "optimization".to_string()],
            is_verified: true,
            created_at: listed(2024, 1, 15),
        },
        AgentProfile {
            id: "2".to_string(),
            name: "CodeReviewer".to_string(),
            description: "Automated code review and security analysis agent".to_string(),
            long_description: "CodeReviewer performs comprehensive code analysis, identifying potential bugs, security vulnerabilities, and optimization opportunities. It supports multiple programming languages and integrates with popular development workflows.".to_string(),
            price: 0.1,
            currency: "ETH".to_string(),
            rating: 4.9,
            total_uses: 8930,
            author: "DevSecure".to_string(),
            category: Category::Macro,
            image: "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=400&h=300&fit=crop&auto=format".to_string(),
            tags: vec!["development".to_string(), "security".to_string(), "automation".to_string()],
            is_verified: true,
            created_at: listed(2024, 1, 10),
        },
        AgentProfile {
            id: "3".to_string(),
            name: "MarketAnalyst".to_string(),
            description: "Real-time crypto market analysis and trading signals".to_string(),
            long_description: "MarketAnalyst provides real-time cryptocurrency market analysis, technical indicators, and trading signals. It uses machine learning to identify patterns and predict market movements with high accuracy.".to_string(),
            price: 0.25,
            currency: "ETH".to_string(),
            rating: 4.6,
            total_uses: 5670,
            author: "CryptoIntel".to_string(),
            category: Category::Macro,
            image: "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=400&h=300&fit=crop&auto=format".to_string(),
            tags: vec!["trading".to_string(), "analysis".to_string(), "crypto".to_string()],
            is_verified: true,
            created_at: listed(2024, 1, 8),
        },
        AgentProfile {
            id: "4".to_string(),
            name: "ContentCreator".to_string(),
            description: "AI content generator for social media and blogs".to_string(),
            long_description: "ContentCreator helps you generate engaging content for various platforms including Twitter, LinkedIn, Instagram, and blogs. It understands your brand voice and creates content that resonates with your audience.".to_string(),
            price: 0.03,
            currency: "ETH".to_string(),
            rating: 4.7,
            total_uses: 12340,
            author: "MediaMind".to_string(),
            category: Category::Popular,
            image: "https://images.unsplash.com/photo-1432888622747-4eb9a8efeb07?w=400&h=300&fit=crop&auto=format".to_string(),
            tags: vec!["content".to_string(), "social media".to_string(), "marketing".to_string()],
            is_verified: false,
            created_at: listed(2024, 1, 12),
        },
        AgentProfile {
            id: "5".to_string(),
            name: "DataCleaner".to_string(),
            description: "Automated data cleaning and preprocessing".to_string(),
            long_description: "DataCleaner automates the tedious process of data cleaning and preprocessing. It can handle missing values, outliers, data type conversions, and format standardization across various data formats.".to_string(),
            price: 0.02,
            currency: "ETH".to_string(),
            rating: 4.5,
            total_uses: 3210,
            author: "DataFlow".to_string(),
            category: Category::Micro,
            image: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=400&h=300&fit=crop&auto=format".to_string(),
            tags: vec!["data".to_string(), "preprocessing".to_string(), "automation".to_string()],
            is_verified: true,
            created_at: listed(2024, 1, 5),
        },
        AgentProfile {
            id: "6".to_string(),
            name: "TranslateBot".to_string(),
            description: "Multi-language translation with context awareness".to_string(),
            long_description: "TranslateBot provides accurate translations across 100+ languages with deep understanding of context, idioms, and cultural nuances. Perfect for international business communications.".to_string(),
            price: 0.01,
            currency: "ETH".to_string(),
            rating: 4.8,
            total_uses: 18750,
            author: "LinguaTech".to_string(),
            category: Category::Popular,
            image: "https://images.unsplash.com/photo-1526661934255-5233e8f3c3a9?w=400&h=300&fit=crop&auto=format".to_string(),
            tags: vec!["translation".to_string(), "language".to_string(), "communication".to_string()],
            is_verified: true,
            created_at: listed(2024, 1, 20),
        },
        AgentProfile {
            id: "7".to_string(),
            name: "LegalAssistant".to_string(),
            description: "Legal document analysis and contract review".to_string(),
            long_description: "LegalAssistant helps analyze legal documents, identify potential issues, and provide recommendations for contract terms. It supports various document types and jurisdictions.".to_string(),
            price: 0.5,
            currency: "ETH".to_string(),
            rating: 4.9,
            total_uses: 1890,
            author: "LegalTech Pro".to_string(),
            category: Category::Macro,
            image: "https://images.unsplash.com/photo-1589829545856-d10d557cf95f?w=400&h=300&fit=crop&auto=format".to_string(),
            tags: vec!["legal".to_string(), "contracts".to_string(), "analysis".to_string()],
            is_verified: true,
            created_at: listed(2024, 1, 3),
        },
        AgentProfile {
            id: "8".to_string(),
            name: "ImageOptimizer".to_string(),
            description: "Batch image processing and optimization".to_string(),
            long_description: "ImageOptimizer provides automated image processing including resizing, compression, format conversion, and quality enhancement. Perfect for web developers and content creators.".to_string(),
            price: 0.005,
            currency: "ETH".to_string(),
            rating: 4.4,
            total_uses: 7650,
            author: "PixelCraft".to_string(),
            category: Category::Micro,
            image: "https://images.unsplash.com/photo-1513475382585-d06e58bcb0e0?w=400&h=300&fit=crop&auto=format".to_string(),
            tags: vec!["image".to_string(), "optimization".to_string(), "processing".to_string()],
            is_verified: false,
            created_at: listed(2024, 1, 18),
        },
    ])
}
