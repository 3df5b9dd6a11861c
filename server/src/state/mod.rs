use {
    self::{command::Command, fanout::Fanout},
    crate::config::Config,
    score_relay_core::leaderboard::Leaderboard,
    tokio::sync::mpsc,
};

pub mod command;
pub mod fanout;

/// Sole owner of the leaderboard. Commands are handled one at a time, so a
/// merge, the rebuilt snapshot and its publish are never interleaved with a
/// subscribe or a read.
pub struct State {
    leaderboard: Leaderboard,
    fanout: Fanout,
    channel: mpsc::Receiver<Command>,
}

impl State {
    pub fn new(config: &Config) -> (Self, mpsc::Sender<Command>) {
        let (sender, channel) = mpsc::channel(config.state_channel_size);
        let state = Self {
            leaderboard: Leaderboard::new(),
            fanout: Fanout::new(config.broadcast_capacity),
            channel,
        };
        (state, sender)
    }

    pub fn spawn(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(command) = self.channel.recv().await {
                match command {
                    Command::Ingest { origin, record } => {
                        command::ingest::handle(&mut self, origin, &record)
                    }
                    Command::Subscribe { response } => {
                        response.send(self.fanout.subscribe()).ok();
                    }
                    Command::CurrentSnapshot { response } => {
                        response.send(self.fanout.current()).ok();
                    }
                }
            }
        })
    }
}
