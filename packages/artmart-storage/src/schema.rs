/// Catalog schema. The catalog is the system of record; the search index is a
/// derived projection rebuilt from these tables.
pub const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS nfts (
	nft_id uuid PRIMARY KEY,
	title text NOT NULL,
	description text NOT NULL,
	creator_id uuid NOT NULL,
	owner_id uuid,
	collection_id uuid NOT NULL,
	tag_ids uuid[] NOT NULL DEFAULT '{}',
	sale jsonb NOT NULL,
	created_at timestamptz NOT NULL,
	updated_at timestamptz NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_nfts_updated_at ON nfts (updated_at, nft_id);
CREATE INDEX IF NOT EXISTS idx_nfts_creator ON nfts (creator_id);
CREATE INDEX IF NOT EXISTS idx_nfts_owner ON nfts (owner_id);

CREATE TABLE IF NOT EXISTS nft_history (
	record_id uuid PRIMARY KEY,
	nft_id uuid NOT NULL,
	kind text NOT NULL,
	buyer_id uuid,
	detail jsonb NOT NULL,
	created_at timestamptz NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_nft_history_nft_kind ON nft_history (nft_id, kind, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_nft_history_buyer ON nft_history (buyer_id) WHERE buyer_id IS NOT NULL;

CREATE TABLE IF NOT EXISTS users (
	user_id uuid PRIMARY KEY,
	nickname text NOT NULL,
	tag_ids uuid[] NOT NULL DEFAULT '{}',
	created_at timestamptz NOT NULL
);

CREATE TABLE IF NOT EXISTS user_follows (
	follower_id uuid NOT NULL,
	followee_id uuid NOT NULL,
	created_at timestamptz NOT NULL,
	PRIMARY KEY (follower_id, followee_id)
);

CREATE TABLE IF NOT EXISTS user_bookmarks (
	user_id uuid NOT NULL,
	nft_id uuid NOT NULL,
	added_at timestamptz NOT NULL,
	PRIMARY KEY (user_id, nft_id)
);

CREATE INDEX IF NOT EXISTS idx_user_bookmarks_nft ON user_bookmarks (nft_id);

CREATE TABLE IF NOT EXISTS event_outbox (
	outbox_id uuid PRIMARY KEY,
	kind text NOT NULL,
	payload jsonb NOT NULL,
	status text NOT NULL DEFAULT 'PENDING',
	attempts integer NOT NULL DEFAULT 0,
	last_error text,
	available_at timestamptz NOT NULL,
	created_at timestamptz NOT NULL,
	updated_at timestamptz NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_event_outbox_pending ON event_outbox (available_at) WHERE status IN ('PENDING', 'FAILED');
";
