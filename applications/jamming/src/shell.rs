//! Line-oriented front-end over a `Session`.

use jamming_core::Item;
use jamming_session::{Session, SessionError};
use std::fmt::Write as _;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Reset,
    Add(usize),
    Remove(usize),
    Name(String),
    Save,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Positions are 1-based as shown on screen.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "search" | "s" if !rest.is_empty() => Ok(Self::Search(rest.to_string())),
            "search" | "s" => Err("usage: search <term>".into()),
            "reset" => Ok(Self::Reset),
            "add" | "a" => parse_position(rest).map(Self::Add),
            "remove" | "rm" => parse_position(rest).map(Self::Remove),
            // The name is taken verbatim, empty included
            "name" => Ok(Self::Name(rest.to_string())),
            "save" => Ok(Self::Save),
            "show" | "ls" | "" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("expected a track number, got `{raw}`")),
    }
}

pub const HELP: &str = "\
commands:
  search <term>    search Spotify for tracks
  reset            clear the search results
  add <n>          add search result n to the playlist
  remove <n>       remove playlist track n
  name <text>      rename the playlist
  save             save the playlist to your Spotify account
  show             show results and playlist
  quit             leave";

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Run one command against the session and return the text to print.
pub async fn execute(session: &mut Session, command: Command) -> (String, Flow) {
    debug!(?command, "Executing command");
    match command {
        Command::Search(term) => match session.search(&term).await {
            Ok(outcome) => (
                format!("{} result(s)\n{}", outcome.result_count, render_results(session)),
                Flow::Continue,
            ),
            Err(e) => report(e),
        },
        Command::Reset => {
            session.reset_search();
            ("search cleared".into(), Flow::Continue)
        }
        Command::Add(index) => match session.search_results().get(index).cloned() {
            Some(item) => {
                let title = item.title().to_string();
                if session.add(item) {
                    (format!("added {title}"), Flow::Continue)
                } else {
                    (format!("{title} is already in the playlist"), Flow::Continue)
                }
            }
            None => ("no such search result".into(), Flow::Continue),
        },
        Command::Remove(index) => match session.playlist().get(index).cloned() {
            Some(item) => {
                session.remove(&item);
                (format!("removed {}", item.title()), Flow::Continue)
            }
            None => ("no such playlist track".into(), Flow::Continue),
        },
        Command::Name(name) => {
            session.rename(name);
            (format!("playlist renamed to \"{}\"", session.playlist_name()), Flow::Continue)
        }
        Command::Save => match session.commit().await {
            Ok(receipt) => (
                format!(
                    "Playlist saved to Spotify! ({} tracks in \"{}\")",
                    receipt.track_count, receipt.name
                ),
                Flow::Continue,
            ),
            Err(e) => report(e),
        },
        Command::Show => (render(session, Instant::now()), Flow::Continue),
        Command::Help => (HELP.into(), Flow::Continue),
        Command::Quit => (String::new(), Flow::Stop),
    }
}

/// Failures are printed, never fatal. Authorization ends this session.
fn report(err: SessionError) -> (String, Flow) {
    if err.started_authorization() {
        return (
            "authorization required: open the link above, then restart with --callback <redirect-url>"
                .into(),
            Flow::Stop,
        );
    }
    (format!("error: {err}"), Flow::Continue)
}

fn item_line(position: usize, item: &Item, marker: &str) -> String {
    let artists = item.artist_line();
    let album = &item.album().name;
    match (artists.is_empty(), album.is_empty()) {
        (false, false) => format!(
            "{marker}{position:>3}. {} - {} ({album})",
            item.title(),
            artists
        ),
        (false, true) => format!("{marker}{position:>3}. {} - {}", item.title(), artists),
        _ => format!("{marker}{position:>3}. {}", item.title()),
    }
}

pub fn render_results(session: &Session) -> String {
    let membership = session.membership();
    let mut out = String::new();
    for (i, item) in session.search_results().iter().enumerate() {
        let marker = if membership.is_selected(item.id()) { "*" } else { " " };
        let _ = writeln!(out, "{}", item_line(i + 1, item, marker));
    }
    out
}

pub fn render(session: &Session, now: Instant) -> String {
    let mut out = String::new();

    if session.save_notice_visible(now) {
        let _ = writeln!(out, ">> Playlist saved to Spotify!");
    }

    if !session.search_results().is_empty() {
        let _ = writeln!(out, "Search Results");
        out.push_str(&render_results(session));
    } else if session.has_searched() {
        let _ = writeln!(out, "No results");
    }

    let _ = writeln!(out, "Playlist: {}", session.playlist_name());
    if session.playlist().is_empty() {
        let _ = writeln!(out, "  (empty)");
    }
    for (i, item) in session.playlist().iter().enumerate() {
        let _ = writeln!(out, "{}", item_line(i + 1, item, " "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_with_spaces() {
        assert_eq!(
            Command::parse("search Daft Punk Discovery"),
            Ok(Command::Search("Daft Punk Discovery".into()))
        );
        assert_eq!(Command::parse("s  x "), Ok(Command::Search("x".into())));
        assert!(Command::parse("search").is_err());
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(Command::parse("add 1"), Ok(Command::Add(0)));
        assert_eq!(Command::parse("rm 3"), Ok(Command::Remove(2)));
        assert!(Command::parse("add 0").is_err());
        assert!(Command::parse("add two").is_err());
    }

    #[test]
    fn name_keeps_text_and_allows_empty() {
        assert_eq!(Command::parse("name My Mix"), Ok(Command::Name("My Mix".into())));
        assert_eq!(Command::parse("name"), Ok(Command::Name(String::new())));
    }

    #[test]
    fn misc_commands() {
        assert_eq!(Command::parse(""), Ok(Command::Show));
        assert_eq!(Command::parse("SAVE"), Ok(Command::Save));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert!(Command::parse("dance").is_err());
    }

    #[test]
    fn authorization_errors_stop_the_loop() {
        assert_eq!(report(SessionError::AuthExpired).1, Flow::Stop);
        assert_eq!(report(SessionError::AuthorizationRequired).1, Flow::Stop);
        assert_eq!(report(SessionError::Stale).1, Flow::Continue);
    }

    mod flow {
        use super::*;
        use async_trait::async_trait;
        use jamming_core::{
            Authorizer, Catalog, Credential, PlaylistId, RemoteError, TokenGrant, UserId,
        };
        use jamming_session::SessionConfig;
        use std::sync::Arc;

        struct StubCatalog;

        #[async_trait]
        impl Catalog for StubCatalog {
            async fn search_tracks(
                &self,
                term: &str,
                _credential: &Credential,
            ) -> jamming_core::Result<Vec<Item>> {
                if term == "expired" {
                    return Err(RemoteError::AuthExpired);
                }
                Ok(vec![
                    Item::new("1", "One More Time", "spotify:track:1"),
                    Item::new("2", "Aerodynamic", "spotify:track:2"),
                ])
            }

            async fn current_user_id(
                &self,
                _credential: &Credential,
            ) -> jamming_core::Result<UserId> {
                Ok(UserId::new("wizzler"))
            }

            async fn create_playlist(
                &self,
                _user: &UserId,
                _name: &str,
                _credential: &Credential,
            ) -> jamming_core::Result<PlaylistId> {
                Ok(PlaylistId::new("pl-1"))
            }

            async fn add_tracks(
                &self,
                _playlist: &PlaylistId,
                _uris: &[String],
                _credential: &Credential,
            ) -> jamming_core::Result<()> {
                Ok(())
            }
        }

        struct NoopAuthorizer;

        impl Authorizer for NoopAuthorizer {
            fn begin_authorization(&self) {}
        }

        fn session() -> Session {
            let mut session = Session::new(
                Arc::new(StubCatalog),
                Arc::new(NoopAuthorizer),
                SessionConfig::default(),
            );
            session.start(Some(TokenGrant::new("token")));
            session
        }

        #[tokio::test]
        async fn search_add_save_round() {
            let mut session = session();

            let (out, flow) = execute(&mut session, Command::Search("daft".into())).await;
            assert_eq!(flow, Flow::Continue);
            assert!(out.starts_with("2 result(s)"));

            execute(&mut session, Command::Add(1)).await;
            let (out, _) = execute(&mut session, Command::Add(1)).await;
            assert!(out.contains("already in the playlist"));

            let (out, _) = execute(&mut session, Command::Show).await;
            assert!(out.contains("*  2. Aerodynamic"));

            execute(&mut session, Command::Name("My Mix".into())).await;
            let (out, flow) = execute(&mut session, Command::Save).await;
            assert_eq!(flow, Flow::Continue);
            assert!(out.contains("1 tracks in \"My Mix\""));
            assert!(session.playlist().is_empty());

            let shown = render(&session, Instant::now());
            assert!(shown.starts_with(">> Playlist saved to Spotify!"));
        }

        #[tokio::test]
        async fn expired_token_stops_the_loop() {
            let mut session = session();
            let (_, flow) = execute(&mut session, Command::Search("expired".into())).await;
            assert_eq!(flow, Flow::Stop);
        }

        #[tokio::test]
        async fn out_of_range_positions_are_reported() {
            let mut session = session();
            let (out, _) = execute(&mut session, Command::Add(5)).await;
            assert_eq!(out, "no such search result");
            let (out, _) = execute(&mut session, Command::Remove(0)).await;
            assert_eq!(out, "no such playlist track");
        }
    }
}
