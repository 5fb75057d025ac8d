pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    api_token TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY,
    owner TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    platform TEXT NOT NULL,
    tech_stack TEXT NOT NULL DEFAULT '',
    scale TEXT NOT NULL DEFAULT '',
    budget INTEGER NOT NULL DEFAULT 0,
    risk_level TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS analyses (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    owner TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    executive_summary TEXT NOT NULL DEFAULT '',
    architecture TEXT NOT NULL DEFAULT '',
    threat_model TEXT NOT NULL DEFAULT '',
    cost_estimation TEXT NOT NULL DEFAULT '',
    sdls_recommendations TEXT NOT NULL DEFAULT '',
    testing_plan TEXT NOT NULL DEFAULT '',
    security_score INTEGER NOT NULL DEFAULT 0 CHECK (security_score BETWEEN 0 AND 100),
    risk_category TEXT NOT NULL DEFAULT 'Unknown',
    scoring_version INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_projects_owner ON projects(owner, created_at);
CREATE INDEX IF NOT EXISTS idx_analyses_project ON analyses(project_id, created_at);
CREATE INDEX IF NOT EXISTS idx_analyses_owner ON analyses(owner);
";
