// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;
use serde::Serialize;
use studyhub_core::Card;
use studyhub_core::CardId;
use studyhub_core::CardState;
use studyhub_core::Date;
use studyhub_core::InvalidQuality;
use studyhub_core::NewCard;
use studyhub_core::Progress;
use studyhub_core::ReviewOutcome;
use studyhub_core::Reward;
use studyhub_core::Timestamp;
use studyhub_core::focus_reward;
use studyhub_core::select_due;
use studyhub_core::submit_review;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS cards (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        course TEXT NOT NULL,
        front TEXT NOT NULL,
        back TEXT NOT NULL,
        source TEXT,
        created_at TEXT NOT NULL,
        easiness_factor REAL NOT NULL,
        interval_days INTEGER NOT NULL,
        repetitions INTEGER NOT NULL,
        next_review_at TEXT NOT NULL,
        total_reviews INTEGER NOT NULL,
        correct_reviews INTEGER NOT NULL,
        last_reviewed_at TEXT
    );

    CREATE INDEX IF NOT EXISTS cards_next_review_at ON cards (next_review_at);

    CREATE TABLE IF NOT EXISTS reviews (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        card_id INTEGER NOT NULL REFERENCES cards (id) ON DELETE CASCADE,
        reviewed_at TEXT NOT NULL,
        quality INTEGER NOT NULL,
        points INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS focus_sessions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        completed_at TEXT NOT NULL,
        duration_minutes INTEGER NOT NULL,
        interrupted INTEGER NOT NULL,
        points INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS progress (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        points INTEGER NOT NULL,
        streak_days INTEGER NOT NULL,
        last_activity TEXT
    );

    INSERT OR IGNORE INTO progress (id, points, streak_days, last_activity)
    VALUES (1, 0, 0, NULL);
";

const CARD_COLUMNS: &str = "id, course, front, back, source, created_at, easiness_factor, \
    interval_days, repetitions, next_review_at, total_reviews, correct_reviews, last_reviewed_at";

/// Why a review could not be recorded.
#[derive(Debug, PartialEq)]
pub enum ReviewError {
    CardNotFound(CardId),
    InvalidQuality(InvalidQuality),
    Database(ErrorReport),
}

impl Display for ReviewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewError::CardNotFound(id) => write!(f, "card {id} not found."),
            ReviewError::InvalidQuality(e) => write!(f, "{e}"),
            ReviewError::Database(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ReviewError {}

impl From<InvalidQuality> for ReviewError {
    fn from(value: InvalidQuality) -> Self {
        ReviewError::InvalidQuality(value)
    }
}

impl From<ErrorReport> for ReviewError {
    fn from(value: ErrorReport) -> Self {
        ReviewError::Database(value)
    }
}

impl From<rusqlite::Error> for ReviewError {
    fn from(value: rusqlite::Error) -> Self {
        ReviewError::Database(value.into())
    }
}

impl From<ReviewError> for ErrorReport {
    fn from(value: ReviewError) -> Self {
        match value {
            ReviewError::Database(e) => e,
            other => ErrorReport::new(other.to_string()),
        }
    }
}

/// Totals of completed focus sessions, lifetime and for one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FocusTotals {
    pub sessions: u32,
    pub minutes: u64,
    pub sessions_today: u32,
    pub minutes_today: u64,
}

/// A recorded focus session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FocusSession {
    pub id: i64,
    pub completed_at: Timestamp,
    pub duration_minutes: u32,
    pub interrupted: bool,
    pub points: u32,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(path: &Path) -> Fallible<Self> {
        log::debug!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn insert_card(&self, card: &NewCard, now: Timestamp) -> Fallible<Card> {
        validate_new_card(card)?;
        let state = CardState::new(now);
        self.conn.execute(
            "INSERT INTO cards (course, front, back, source, created_at, easiness_factor, \
             interval_days, repetitions, next_review_at, total_reviews, correct_reviews, \
             last_reviewed_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                card.course,
                card.front,
                card.back,
                card.source,
                now.to_string(),
                state.easiness_factor,
                state.interval,
                state.repetitions,
                state.next_review_at.to_string(),
                state.total_reviews,
                state.correct_reviews,
                state.last_reviewed_at.map(|ts| ts.to_string()),
            ],
        )?;
        let id: CardId = self.conn.last_insert_rowid();
        log::debug!("Inserted card {id}");
        Ok(Card {
            id,
            course: card.course.clone(),
            front: card.front.clone(),
            back: card.back.clone(),
            source: card.source.clone(),
            created_at: now,
            state,
        })
    }

    pub fn get_card(&self, id: CardId) -> Fallible<Option<Card>> {
        fetch_card(&self.conn, id)
    }

    /// All cards, optionally restricted to one course, in creation order.
    pub fn list_cards(&self, course: Option<&str>) -> Fallible<Vec<Card>> {
        let sql = format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE (?1 IS NULL OR course = ?1) ORDER BY id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![course], CardRow::from_row)?
            .collect::<Result<Vec<CardRow>, _>>()?;
        rows.into_iter().map(CardRow::into_card).collect()
    }

    /// Cards due at `now`, most overdue first.
    pub fn due_cards(&self, now: Timestamp, limit: Option<usize>) -> Fallible<Vec<Card>> {
        let cards = self.list_cards(None)?;
        Ok(select_due(&cards, now, limit).into_iter().cloned().collect())
    }

    /// Returns false if there was no such card.
    pub fn delete_card(&self, id: CardId) -> Fallible<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM cards WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    /// Review a card and credit the reward, atomically. Nothing is written
    /// if the card does not exist or the quality is out of range.
    pub fn review_card(
        &self,
        id: CardId,
        quality: i64,
        now: Timestamp,
    ) -> Result<ReviewOutcome, ReviewError> {
        let tx = self.conn.unchecked_transaction()?;
        let card: Card = fetch_card(&tx, id)?.ok_or(ReviewError::CardNotFound(id))?;
        let outcome: ReviewOutcome = submit_review(&card.state, quality, now)?;
        let ReviewOutcome { state, reward } = outcome;
        tx.execute(
            "UPDATE cards SET easiness_factor = ?1, interval_days = ?2, repetitions = ?3, \
             next_review_at = ?4, total_reviews = ?5, correct_reviews = ?6, \
             last_reviewed_at = ?7 WHERE id = ?8",
            params![
                state.easiness_factor,
                state.interval,
                state.repetitions,
                state.next_review_at.to_string(),
                state.total_reviews,
                state.correct_reviews,
                state.last_reviewed_at.map(|ts| ts.to_string()),
                id,
            ],
        )?;
        tx.execute(
            "INSERT INTO reviews (card_id, reviewed_at, quality, points) VALUES (?1, ?2, ?3, ?4)",
            params![id, now.to_string(), quality, reward.points],
        )?;
        let progress = read_progress(&tx)?.apply(reward, now);
        write_progress(&tx, &progress)?;
        tx.commit()?;
        log::debug!(
            "Reviewed card {id} with quality {quality}: next review at {}",
            state.next_review_at
        );
        Ok(outcome)
    }

    /// Number of reviews recorded on the given date.
    pub fn review_count_on(&self, date: Date) -> Fallible<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM reviews WHERE substr(reviewed_at, 1, 10) = ?1",
            params![date.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Record a finished focus session and credit its reward.
    pub fn record_focus_session(
        &self,
        duration_minutes: u32,
        interrupted: bool,
        now: Timestamp,
    ) -> Fallible<(Reward, Progress)> {
        let reward = focus_reward(duration_minutes, interrupted);
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO focus_sessions (completed_at, duration_minutes, interrupted, points) \
             VALUES (?1, ?2, ?3, ?4)",
            params![now.to_string(), duration_minutes, interrupted, reward.points],
        )?;
        let progress = read_progress(&tx)?.apply(reward, now);
        write_progress(&tx, &progress)?;
        tx.commit()?;
        Ok((reward, progress))
    }

    /// Totals of completed sessions. The daily counts cover sessions
    /// completed on `today`.
    pub fn focus_totals(&self, today: Date) -> Fallible<FocusTotals> {
        let (sessions, minutes, sessions_today, minutes_today): (u32, i64, u32, i64) =
            self.conn.query_row(
                "SELECT COUNT(*), COALESCE(SUM(duration_minutes), 0), \
                 COALESCE(SUM(substr(completed_at, 1, 10) = ?1), 0), \
                 COALESCE(SUM(CASE WHEN substr(completed_at, 1, 10) = ?1 \
                     THEN duration_minutes ELSE 0 END), 0) \
                 FROM focus_sessions WHERE interrupted = 0",
                params![today.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )?;
        let minutes_of = |minutes: i64| {
            u64::try_from(minutes)
                .map_err(|_| ErrorReport::new("negative focus minutes in database."))
        };
        Ok(FocusTotals {
            sessions,
            minutes: minutes_of(minutes)?,
            sessions_today,
            minutes_today: minutes_of(minutes_today)?,
        })
    }

    /// Recorded focus sessions, interrupted ones included, newest first.
    pub fn focus_sessions(&self, limit: usize) -> Fallible<Vec<FocusSession>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(
            "SELECT id, completed_at, duration_minutes, interrupted, points \
             FROM focus_sessions ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, bool>(3)?,
                    row.get::<_, u32>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter()
            .map(|(id, completed_at, duration_minutes, interrupted, points)| -> Fallible<FocusSession> {
                Ok(FocusSession {
                    id,
                    completed_at: Timestamp::try_from(completed_at)?,
                    duration_minutes,
                    interrupted,
                    points,
                })
            })
            .collect()
    }

    pub fn get_progress(&self) -> Fallible<Progress> {
        read_progress(&self.conn)
    }
}

/// Cards need a course and both sides.
pub fn validate_new_card(card: &NewCard) -> Fallible<()> {
    for (field, value) in [
        ("course", &card.course),
        ("front", &card.front),
        ("back", &card.back),
    ] {
        if value.trim().is_empty() {
            return fail(format!("card {field} must not be empty."));
        }
    }
    Ok(())
}

/// A card as stored, before timestamps are parsed.
struct CardRow {
    id: CardId,
    course: String,
    front: String,
    back: String,
    source: Option<String>,
    created_at: String,
    easiness_factor: f64,
    interval: u32,
    repetitions: u32,
    next_review_at: String,
    total_reviews: u32,
    correct_reviews: u32,
    last_reviewed_at: Option<String>,
}

impl CardRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            course: row.get(1)?,
            front: row.get(2)?,
            back: row.get(3)?,
            source: row.get(4)?,
            created_at: row.get(5)?,
            easiness_factor: row.get(6)?,
            interval: row.get(7)?,
            repetitions: row.get(8)?,
            next_review_at: row.get(9)?,
            total_reviews: row.get(10)?,
            correct_reviews: row.get(11)?,
            last_reviewed_at: row.get(12)?,
        })
    }

    fn into_card(self) -> Fallible<Card> {
        let last_reviewed_at = match self.last_reviewed_at {
            Some(ts) => Some(Timestamp::try_from(ts)?),
            None => None,
        };
        Ok(Card {
            id: self.id,
            course: self.course,
            front: self.front,
            back: self.back,
            source: self.source,
            created_at: Timestamp::try_from(self.created_at)?,
            state: CardState {
                easiness_factor: self.easiness_factor,
                interval: self.interval,
                repetitions: self.repetitions,
                next_review_at: Timestamp::try_from(self.next_review_at)?,
                total_reviews: self.total_reviews,
                correct_reviews: self.correct_reviews,
                last_reviewed_at,
            },
        })
    }
}

fn fetch_card(conn: &Connection, id: CardId) -> Fallible<Option<Card>> {
    let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1");
    let row: Option<CardRow> = conn
        .query_row(&sql, params![id], CardRow::from_row)
        .optional()?;
    row.map(CardRow::into_card).transpose()
}

fn read_progress(conn: &Connection) -> Fallible<Progress> {
    let (points, streak_days, last_activity): (i64, u32, Option<String>) = conn.query_row(
        "SELECT points, streak_days, last_activity FROM progress WHERE id = 1",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    let points =
        u64::try_from(points).map_err(|_| ErrorReport::new("negative points in database."))?;
    let last_activity = match last_activity {
        Some(ts) => Some(Timestamp::try_from(ts)?),
        None => None,
    };
    Ok(Progress {
        points,
        streak_days,
        last_activity,
    })
}

fn write_progress(conn: &Connection, progress: &Progress) -> Fallible<()> {
    let points = i64::try_from(progress.points).unwrap_or(i64::MAX);
    conn.execute(
        "UPDATE progress SET points = ?1, streak_days = ?2, last_activity = ?3 WHERE id = 1",
        params![
            points,
            progress.streak_days,
            progress.last_activity.map(|ts| ts.to_string()),
        ],
    )?;
    Ok(())
}
