use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use chrono::{NaiveTime, Timelike};
use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::UdpSocket;

use crate::modes::dawn::{DawnMode, DawnModes};
use crate::modes::visual::VisualMode;

/// Reply header of a state snapshot.
const CURR_HEADER: &str = "CURR";
/// Reply header of an alarm-schedule snapshot.
const ALMS_HEADER: &str = "ALMS";
/// Receive buffer size, matching the stock firmware's largest reply.
const RECV_BUFFER_SIZE: usize = 4096;

/// A failure to decode a lamp reply or a caller-supplied time string.
///
/// These never abort an operation chain on their own; client methods return
/// them inside [`anyhow::Error`] so callers can distinguish a decode failure
/// from a legitimately `false`/zero value in a successful reply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unexpected reply header: expected {expected:?}, got {got:?}")]
    UnexpectedHeader { expected: &'static str, got: String },

    #[error("truncated reply: expected {expected} fields, got {got}")]
    TruncatedReply { expected: usize, got: usize },

    #[error("malformed {field} field: {value:?}")]
    MalformedField { field: &'static str, value: String },

    #[error("malformed time string {0:?}, expected HH:MM")]
    MalformedTime(String),
}

/// Day of the week an alarm belongs to.
///
/// Indexes the [`AlarmSchedule::alarms`] array; on the wire the lamp uses
/// 1-based day ids with the same Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// 0-based index of the day, Monday = 0.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Weekday {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            _ => Err(anyhow!("Invalid weekday")),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day_str = match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        };
        write!(f, "{}", day_str)
    }
}

/// A snapshot of the lamp's state, decoded from a `CURR` reply.
///
/// Constructed fresh on every query or state-changing command; nothing is
/// cached between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LampState {
    /// Id of the active visual mode.
    pub mode_id: u8,
    /// Whether the lamp is powered on.
    pub enabled: bool,
    /// Brightness of the current mode, 0-255.
    pub brightness: u8,
    /// Animation speed of the current mode, 0-255.
    pub speed: u8,
    /// Scale of the current mode, 0-255.
    pub scale: u8,
}

impl LampState {
    /**
    Decodes a raw `CURR` reply, e.g. `"CURR 3 200 150 10 1"`.

    The fields after the header are, in order: mode id, brightness, speed,
    scale and the power flag (nonzero means on). Usable on a pre-received
    string as well as on replies fetched by [`LampClient`].
     */
    pub fn parse(reply: &str) -> Result<Self, ProtocolError> {
        let mut tokens = reply.split_whitespace();
        let header = tokens.next().unwrap_or("");
        if header != CURR_HEADER {
            return Err(ProtocolError::UnexpectedHeader {
                expected: CURR_HEADER,
                got: header.to_string(),
            });
        }

        let fields: Vec<&str> = tokens.collect();
        if fields.len() < 5 {
            return Err(ProtocolError::TruncatedReply {
                expected: 5,
                got: fields.len(),
            });
        }

        Ok(LampState {
            mode_id: parse_field(fields[0], "mode_id")?,
            enabled: parse_field::<u8>(fields[4], "enabled")? != 0,
            brightness: parse_field(fields[1], "brightness")?,
            speed: parse_field(fields[2], "speed")?,
            scale: parse_field(fields[3], "scale")?,
        })
    }
}

/// One alarm slot of the weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmEntry {
    /// Whether the alarm fires on this day.
    pub enabled: bool,
    /// Alarm time in minutes since midnight, 0-1439.
    pub time_minutes: u16,
}

impl AlarmEntry {
    /// The alarm time as a [`NaiveTime`], or `None` if the lamp reported a
    /// value past 23:59.
    pub fn time(&self) -> Option<NaiveTime> {
        let minutes = u32::from(self.time_minutes);
        NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
    }
}

/// The lamp's weekly alarm schedule, decoded from an `ALMS` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmSchedule {
    /// One entry per day, Monday first.
    pub alarms: [AlarmEntry; 7],
    /// 0-based id of the active dawn preset.
    pub dawn_mode_id: u8,
}

impl AlarmSchedule {
    /**
    Decodes a raw `ALMS` reply.

    After the header come seven per-day enabled flags (Monday through
    Sunday), seven per-day times in minutes since midnight, and the 1-based
    dawn preset id, which is stored 0-based here.
     */
    pub fn parse(reply: &str) -> Result<Self, ProtocolError> {
        let mut tokens = reply.split_whitespace();
        let header = tokens.next().unwrap_or("");
        if header != ALMS_HEADER {
            return Err(ProtocolError::UnexpectedHeader {
                expected: ALMS_HEADER,
                got: header.to_string(),
            });
        }

        let fields: Vec<&str> = tokens.collect();
        if fields.len() < 15 {
            return Err(ProtocolError::TruncatedReply {
                expected: 15,
                got: fields.len(),
            });
        }

        let mut alarms = [AlarmEntry {
            enabled: false,
            time_minutes: 0,
        }; 7];
        for (day, entry) in alarms.iter_mut().enumerate() {
            entry.enabled = parse_field::<u8>(fields[day], "alarm flag")? != 0;
            entry.time_minutes = parse_field(fields[7 + day], "alarm time")?;
        }

        let raw_dawn: u8 = parse_field(fields[14], "dawn mode")?;
        Ok(AlarmSchedule {
            alarms,
            dawn_mode_id: raw_dawn.saturating_sub(1),
        })
    }

    /// The entry for a given day.
    pub fn alarm(&self, day: Weekday) -> &AlarmEntry {
        &self.alarms[day.index()]
    }

    /// The active dawn preset, resolved through the catalog.
    pub fn dawn_mode(&self) -> Option<&'static DawnMode> {
        DawnModes::by_id(i32::from(self.dawn_mode_id))
    }
}

fn parse_field<T: FromStr>(token: &str, field: &'static str) -> Result<T, ProtocolError> {
    token.parse().map_err(|_| ProtocolError::MalformedField {
        field,
        value: token.to_string(),
    })
}

// Command builders. Out-of-range arguments are clamped, never rejected,
// matching the firmware's own tolerance.

fn byte_command(prefix: &str, value: i32) -> String {
    format!("{}{}", prefix, value.clamp(0, 255))
}

fn dawn_command(dawn_id: i32) -> String {
    format!("DAWN{}", dawn_id.clamp(0, 8) + 1)
}

fn alarm_day(day_id: i32) -> i32 {
    day_id.clamp(0, 6) + 1
}

fn alarm_enabled_command(day_id: i32, enabled: bool) -> String {
    format!(
        "ALM_SET{}{}",
        alarm_day(day_id),
        if enabled { "ON" } else { "OFF" }
    )
}

fn alarm_time_command(day_id: i32, minutes: i32) -> String {
    format!("ALM_SET{}{}", alarm_day(day_id), minutes.clamp(0, 1439))
}

/// Parses an `HH:MM` string into minutes since midnight. Exactly two
/// colon-separated numeric fields are required; hour and minute are clamped
/// to 0-23 and 0-59 respectively.
fn parse_alarm_time(time: &str) -> Result<i32, ProtocolError> {
    let fields: Vec<&str> = time.split(':').collect();
    if fields.len() != 2 {
        return Err(ProtocolError::MalformedTime(time.to_string()));
    }
    let hour: i32 = fields[0]
        .trim()
        .parse()
        .map_err(|_| ProtocolError::MalformedTime(time.to_string()))?;
    let minute: i32 = fields[1]
        .trim()
        .parse()
        .map_err(|_| ProtocolError::MalformedTime(time.to_string()))?;
    Ok(hour.clamp(0, 23) * 60 + minute.clamp(0, 59))
}

/**
A client for one GyverLamp device.

Owns a UDP socket connected to the lamp for the client's lifetime; the
socket is closed when the client is dropped. Operations take `&mut self` so
that only one request is ever in flight per client: the protocol has no
reply correlation, and the next datagram received is attributed to the last
command sent. Use one client per physical lamp.

The protocol gives no delivery guarantee. An operation whose reply datagram
is lost blocks until cancelled; wrap calls in [`tokio::time::timeout`] when
bounded latency is needed. Note that after such a timeout a late reply may
still sit in the socket buffer and be picked up by the next operation.
 */
#[derive(Debug)]
pub struct LampClient {
    host: String,
    port: u16,
    socket: UdpSocket,
    connected: bool,
}

impl LampClient {
    /**
    Opens a client for the lamp at `host:port`.

    UDP is connectionless, so an unreachable lamp does not fail
    construction; the outcome of the connect step is only recorded as a
    best-effort reachability hint, readable via [`Self::is_connected`].
    Only local socket creation failures return an error.
     */
    pub async fn new(host: &str, port: u16) -> anyhow::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .context("failed to open UDP socket")?;
        let connected = match socket.connect((host, port)).await {
            Ok(()) => true,
            Err(err) => {
                debug!("connect to {}:{} failed: {}", host, port, err);
                false
            }
        };

        Ok(LampClient {
            host: host.to_string(),
            port,
            socket,
            connected,
        })
    }

    /// Whether the connect step succeeded. Informational only: a `true`
    /// here does not guarantee the lamp will answer.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Queries the lamp state.
    pub async fn get_state(&mut self) -> anyhow::Result<LampState> {
        let reply = self.send_command("GET").await?;
        Ok(LampState::parse(&reply)?)
    }

    /// Queries the lamp state and returns the raw reply string.
    pub async fn get_state_raw(&mut self) -> anyhow::Result<String> {
        self.send_command("GET").await
    }

    /// Sets the brightness of the current mode. Values outside 0-255 are
    /// clamped.
    pub async fn set_brightness(&mut self, brightness: i32) -> anyhow::Result<LampState> {
        let reply = self.send_command(&byte_command("BRI", brightness)).await?;
        Ok(LampState::parse(&reply)?)
    }

    /// Sets the animation speed of the current mode. Values outside 0-255
    /// are clamped.
    pub async fn set_speed(&mut self, speed: i32) -> anyhow::Result<LampState> {
        let reply = self.send_command(&byte_command("SPD", speed)).await?;
        Ok(LampState::parse(&reply)?)
    }

    /// Sets the scale of the current mode. Values outside 0-255 are
    /// clamped.
    pub async fn set_scale(&mut self, scale: i32) -> anyhow::Result<LampState> {
        let reply = self.send_command(&byte_command("SCA", scale)).await?;
        Ok(LampState::parse(&reply)?)
    }

    /// Switches the lamp to a visual mode by raw id. Values outside 0-255
    /// are clamped; the firmware ignores ids it has no mode for.
    pub async fn set_mode_raw(&mut self, mode_id: i32) -> anyhow::Result<LampState> {
        let reply = self.send_command(&byte_command("EFF", mode_id)).await?;
        Ok(LampState::parse(&reply)?)
    }

    /// Switches the lamp to a catalog mode.
    pub async fn set_mode(&mut self, mode: &VisualMode) -> anyhow::Result<LampState> {
        self.set_mode_raw(i32::from(mode.id)).await
    }

    /// Powers the lamp on or off.
    pub async fn set_power(&mut self, on: bool) -> anyhow::Result<LampState> {
        let command = if on { "P_ON" } else { "P_OFF" };
        let reply = self.send_command(command).await?;
        Ok(LampState::parse(&reply)?)
    }

    /**
    Toggles lamp power and returns the new power flag.

    This is a read-then-write exchange, not an atomic operation: a state
    change made by another controller between the read and the write is
    silently overwritten.
     */
    pub async fn toggle_power(&mut self) -> anyhow::Result<bool> {
        let target = !self.get_state().await?.enabled;
        let state = self.set_power(target).await?;
        Ok(state.enabled)
    }

    /// Queries the weekly alarm schedule.
    pub async fn get_alarms(&mut self) -> anyhow::Result<AlarmSchedule> {
        let reply = self.send_command("ALM_GET").await?;
        Ok(AlarmSchedule::parse(&reply)?)
    }

    /// Queries the alarm schedule and returns the raw reply string.
    pub async fn get_alarms_raw(&mut self) -> anyhow::Result<String> {
        self.send_command("ALM_GET").await
    }

    /// Selects the dawn preset by 0-based id (clamped to the nine presets)
    /// and returns the resulting schedule.
    pub async fn set_dawn_mode_raw(&mut self, dawn_id: i32) -> anyhow::Result<AlarmSchedule> {
        self.mutate_alarms(&dawn_command(dawn_id)).await
    }

    /// Selects a catalog dawn preset and returns the resulting schedule.
    pub async fn set_dawn_mode(&mut self, mode: &DawnMode) -> anyhow::Result<AlarmSchedule> {
        self.set_dawn_mode_raw(i32::from(mode.id)).await
    }

    /// Enables or disables the alarm for a 0-based day id (clamped to
    /// Monday..Sunday) and returns the resulting schedule.
    pub async fn set_alarm_enabled_raw(
        &mut self,
        day_id: i32,
        enabled: bool,
    ) -> anyhow::Result<AlarmSchedule> {
        self.mutate_alarms(&alarm_enabled_command(day_id, enabled))
            .await
    }

    /// Enables or disables the alarm for a day.
    pub async fn set_alarm_enabled(
        &mut self,
        day: Weekday,
        enabled: bool,
    ) -> anyhow::Result<AlarmSchedule> {
        self.set_alarm_enabled_raw(day.index() as i32, enabled).await
    }

    /// Sets the alarm time for a 0-based day id, in minutes since midnight
    /// (clamped to 0-1439), and returns the resulting schedule.
    pub async fn set_alarm_time_raw(
        &mut self,
        day_id: i32,
        minutes: i32,
    ) -> anyhow::Result<AlarmSchedule> {
        self.mutate_alarms(&alarm_time_command(day_id, minutes)).await
    }

    /**
    Sets the alarm time for a day from an `HH:MM` string, e.g. `"21:50"`.

    A string without exactly two colon-separated numeric fields yields an
    error and nothing is sent. Hour and minute are clamped to their valid
    ranges individually, so `"25:99"` sets 23:59.
     */
    pub async fn set_alarm_time(
        &mut self,
        day: Weekday,
        time: &str,
    ) -> anyhow::Result<AlarmSchedule> {
        let minutes = parse_alarm_time(time)?;
        self.set_alarm_time_raw(day.index() as i32, minutes).await
    }

    /// Sets the alarm time for a day from a [`NaiveTime`]. Seconds are
    /// dropped; the lamp stores whole minutes.
    pub async fn set_alarm_at(
        &mut self,
        day: Weekday,
        time: NaiveTime,
    ) -> anyhow::Result<AlarmSchedule> {
        let minutes = (time.hour() * 60 + time.minute()) as i32;
        self.set_alarm_time_raw(day.index() as i32, minutes).await
    }

    // The firmware acknowledges alarm mutations with a short status
    // datagram, not a schedule snapshot. Drain the ack, then query for the
    // updated schedule.
    async fn mutate_alarms(&mut self, command: &str) -> anyhow::Result<AlarmSchedule> {
        self.send_command(command).await?;
        self.get_alarms().await
    }

    /// Sends one raw command datagram and blocks for the next reply
    /// datagram. No timeout is applied here.
    async fn send_command(&mut self, command: &str) -> anyhow::Result<String> {
        debug!("sending {:?} to {}:{}", command, self.host, self.port);
        self.socket
            .send(command.as_bytes())
            .await
            .with_context(|| format!("failed to send {:?} to {}:{}", command, self.host, self.port))?;

        let mut buffer = [0; RECV_BUFFER_SIZE];
        let received = self
            .socket
            .recv(&mut buffer)
            .await
            .context("failed to receive reply")?;
        let reply = std::str::from_utf8(&buffer[..received]).context("reply is not valid UTF-8")?;
        debug!("received {:?}", reply);
        Ok(reply.to_string())
    }
}
