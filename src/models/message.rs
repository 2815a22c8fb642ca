use crate::{
    models::{macros::thing_variant, Created, Reportable, Thing, ThingData},
    result::Result,
};

thing_variant! {
    /// A private message, or a comment reply delivered to the inbox.
    Message
}

impl Message {
    /// Sender's username.
    pub fn author(&self) -> Option<&str> {
        self.get_str("author")
    }

    /// Recipient's username.
    pub fn dest(&self) -> Option<&str> {
        self.get_str("dest")
    }

    /// Subject line.
    pub fn subject(&self) -> Option<&str> {
        self.get_str("subject")
    }

    /// Markdown body.
    pub fn body(&self) -> Option<&str> {
        self.get_str("body")
    }

    /// Whether the message is unread.
    pub fn is_new(&self) -> Option<bool> {
        self.get_bool("new")
    }

    /// Whether this is a comment reply rather than a private message.
    pub fn was_comment(&self) -> Option<bool> {
        self.get_bool("was_comment")
    }

    /// Marks the message read.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn read(&self) -> Result<()> {
        self.client().read_message(&self.require_name()?).await
    }

    /// Marks the message unread.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn unread(&self) -> Result<()> {
        self.client().unread_message(&self.require_name()?).await
    }

    /// Replies to the message, returning the reply.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the action is rejected, or nothing is
    /// echoed back.
    pub async fn reply(&self, text: &str) -> Result<Thing> {
        let name = self.require_name()?;
        let reply_id = format!("#commentreply_{name}");
        self.client()
            .submit_echo(
                "api/comment",
                &[("thing_id", name.as_str()), ("id", reply_id.as_str()), ("text", text)],
            )
            .await
    }
}

impl Created for Message {}
impl Reportable for Message {}

#[cfg(feature = "display")]
impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.author().unwrap_or_default(),
            self.body().unwrap_or_default().replace('\n', " ")
        )
    }
}
