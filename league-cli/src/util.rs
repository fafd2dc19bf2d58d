use anyhow::{Context, Result, bail};
use league_engine::{Knockout, PlayerDirectory, PlayerId};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Resolve a player token: a numeric id, or a registered name.
pub fn parse_player(token: &str, directory: &PlayerDirectory) -> Result<PlayerId> {
    if let Ok(raw) = token.parse::<u32>() {
        return Ok(PlayerId(raw));
    }
    directory
        .find_by_name(token)
        .map(|p| p.id)
        .with_context(|| format!("no player named {token:?}"))
}

pub fn parse_results(s: &str, directory: &PlayerDirectory) -> Result<Vec<PlayerId>> {
    split_csv(s)
        .iter()
        .map(|token| parse_player(token, directory))
        .collect()
}

/// Parse `perpetrator:victim` pairs.
pub fn parse_knockouts(s: &str, directory: &PlayerDirectory) -> Result<Vec<Knockout>> {
    split_csv(s)
        .iter()
        .map(|pair| {
            let Some((perpetrator, victim)) = pair.split_once(':') else {
                bail!("knockout {pair:?} should look like perpetrator:victim");
            };
            Ok(Knockout::new(
                parse_player(perpetrator.trim(), directory)?,
                parse_player(victim.trim(), directory)?,
            ))
        })
        .collect()
}
