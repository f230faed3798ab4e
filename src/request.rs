//! Inbound, upstream and caller-facing payload shapes

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sampling temperature for every upstream request
pub const TEMPERATURE: f32 = 0.2;

/// Decode an explicit `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where D: Deserializer<'de>
    , T: Default + Deserialize<'de>
{   Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Inbound prompt; absent or null fields decode as empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompt
{   #[serde(deserialize_with = "null_as_default")]
    pub context: String
  , #[serde(deserialize_with = "null_as_default")]
    pub message: String
}

impl Prompt
{   /// System instruction first, user content second
    pub fn to_messages(&self) -> Vec<Message>
    {   vec![
          Message::new(Role::System, self.context.clone())
        , Message::new(Role::User, self.message.clone())
        ]
    }
}

/// Message author. Roles the upstream invents are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role
{   System
  , User
  , Assistant
  , Other(String)
}

impl Role
{   pub fn as_str(&self) -> &str
    {   match self
        {   Role::System => "system"
          , Role::User => "user"
          , Role::Assistant => "assistant"
          , Role::Other(role) => role
        }
    }
}

impl From<String> for Role
{   fn from(role: String) -> Self
    {   match role.as_str()
        {   "system" => Role::System
          , "user" => Role::User
          , "assistant" => Role::Assistant
          , _ => Role::Other(role)
        }
    }
}

impl Serialize for Role
{   fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer
    {   serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role
{   fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>
    {   let role: String = null_as_default(deserializer)?;
        Ok(Role::from(role))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message
{   #[serde(default = "unknown_role")]
    pub role: Role
  , #[serde(default, deserialize_with = "null_as_default")]
    pub content: String
}

fn unknown_role() -> Role
{   Role::Other(String::new())
}

impl Message
{   pub fn new(role: Role, content: impl Into<String>) -> Self
    {   Message
        {   role
          , content: content.into()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest
{   pub model: String
  , pub messages: Vec<Message>
  , pub temperature: f32
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_tokens: Option<u32>
}

/// Upstream reply; absent or null fields decode as zero values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionResponse
{   #[serde(deserialize_with = "null_as_default")]
    pub id: String
  , #[serde(deserialize_with = "null_as_default")]
    pub object: String
  , #[serde(deserialize_with = "null_as_default")]
    pub created: i64
  , #[serde(deserialize_with = "null_as_default")]
    pub model: String
  , #[serde(deserialize_with = "null_as_default")]
    pub choices: Vec<Choice>
  , #[serde(deserialize_with = "null_as_default")]
    pub usage: Usage
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice
{   #[serde(default, deserialize_with = "null_as_default")]
    pub index: u32
  , #[serde(
      default = "empty_message",
      deserialize_with = "null_or_empty_message"
    )]
    pub message: Message
  , #[serde(default)]
    pub finish_reason: Option<String>
}

fn empty_message() -> Message
{   Message::new(unknown_role(), String::new())
}

fn null_or_empty_message<'de, D>(deserializer: D) -> Result<Message, D::Error>
where D: Deserializer<'de>
{   Ok(Option::<Message>::deserialize(deserializer)?
      .unwrap_or_else(empty_message))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage
{   #[serde(deserialize_with = "null_as_default")]
    pub prompt_tokens: u64
  , #[serde(deserialize_with = "null_as_default")]
    pub completion_tokens: u64
  , #[serde(deserialize_with = "null_as_default")]
    pub total_tokens: u64
}

/// Caller-facing result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEnvelope
{   pub prompt_result: String
  , pub finish_reason: String
  , pub model: String
  , pub used_tokens: u64
}

impl ResultEnvelope
{   /// Built from the last choice, not the first.
    pub fn from_response(
      response: CompletionResponse
    ) -> Result<Self, crate::error::Error>
    {   let CompletionResponse { model, mut choices, usage, .. }
          = response;
        let choice = choices.pop()
          .ok_or(crate::error::Error::NoChoicesInResponse)?;

        Ok(ResultEnvelope
        {   prompt_result: choice.message.content
          , finish_reason: choice.finish_reason.unwrap_or_default()
          , model
          , used_tokens: usage.total_tokens
        })
    }
}
