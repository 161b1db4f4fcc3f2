//! The static dialogue script and its lookup/validation logic.
//!
//! A script is a flat table of [`DialogueNode`]s keyed by numeric id.
//! Replies reference their target node by id rather than by pointer, so
//! the "start over" loop back to node 0 needs no special handling.

use thiserror::Error;

/// One step of the scripted dialogue: the narrator's text plus the
/// replies it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueNode {
    pub id: u32,
    pub body: &'static str,
    /// Path to a diagram shown alongside the message, if any. Purely a
    /// presentation reference; nothing ever loads it from disk.
    pub image: Option<&'static str>,
    pub replies: &'static [Reply],
}

/// A user-selectable line of dialogue.
///
/// `next_id = None` means the reply leads nowhere and the conversation
/// stalls on the current node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub id: u32,
    pub text: &'static str,
    pub next_id: Option<u32>,
}

/// Violations reported by [`Script::validate`].
///
/// Runtime traversal stays fail-silent on lookup misses; validation is
/// how tests and startup checks catch a broken table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("start node {0} is missing from the script")]
    MissingStart(u32),

    #[error("node id {0} appears more than once")]
    DuplicateNode(u32),

    #[error("reply {reply_id} points at nonexistent node {next_id}")]
    DanglingNext { reply_id: u32, next_id: u32 },

    #[error("node {0} is reachable but offers no replies")]
    NoReplies(u32),
}

/// An immutable dialogue table.
#[derive(Debug, Clone, Copy)]
pub struct Script {
    nodes: &'static [DialogueNode],
}

impl Script {
    /// Node id conversations begin at.
    pub const START_ID: u32 = 0;

    /// The built-in "first LAN" conversation.
    pub fn builtin() -> Self {
        Self { nodes: LAN_SCRIPT }
    }

    /// Wrap a custom table, e.g. for tests.
    pub fn new(nodes: &'static [DialogueNode]) -> Self {
        Self { nodes }
    }

    /// Look up a node by id. Linear scan; the table is small and fixed.
    pub fn get(&self, id: u32) -> Option<&'static DialogueNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn nodes(&self) -> &'static [DialogueNode] {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check the table invariants:
    ///
    /// - the start node exists,
    /// - node ids are unique,
    /// - every `next_id` resolves to some node,
    /// - every node reachable from the start offers at least one reply.
    ///
    /// Returns the first violation found.
    pub fn validate(&self, start: u32) -> Result<(), ScriptError> {
        if self.get(start).is_none() {
            return Err(ScriptError::MissingStart(start));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if self.nodes[..i].iter().any(|other| other.id == node.id) {
                return Err(ScriptError::DuplicateNode(node.id));
            }
            for reply in node.replies {
                if let Some(next_id) = reply.next_id {
                    if self.get(next_id).is_none() {
                        return Err(ScriptError::DanglingNext {
                            reply_id: reply.id,
                            next_id,
                        });
                    }
                }
            }
        }

        // Walk everything reachable from the start node.
        let mut visited: Vec<u32> = Vec::with_capacity(self.nodes.len());
        let mut frontier = vec![start];
        while let Some(id) = frontier.pop() {
            if visited.contains(&id) {
                continue;
            }
            visited.push(id);
            // Existence was checked above, but stay defensive about it.
            let Some(node) = self.get(id) else { continue };
            if node.replies.is_empty() {
                return Err(ScriptError::NoReplies(id));
            }
            for reply in node.replies {
                if let Some(next_id) = reply.next_id {
                    frontier.push(next_id);
                }
            }
        }

        Ok(())
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The conversation with Bob Metcalfe about designing the first LAN.
///
/// Node ids are even, reply ids odd, matching the original material.
static LAN_SCRIPT: &[DialogueNode] = &[
    DialogueNode {
        id: 0,
        body: "Hi there! I'm Bob Metcalfe, and I'm working on the first attempt to create something called a **Local Area Network**, or **LAN** for short. I want to connect a few computers that are in the same room.\n\nWant to brainstorm with me on how we can build it?",
        image: None,
        replies: &[Reply {
            id: 1,
            text: "Sure, but why would we even want to connect computers?",
            next_id: Some(2),
        }],
    },
    DialogueNode {
        id: 2,
        body: "At the moment, if someone working on one of these computers wants to share their work, they have to copy everything to a disk and physically walk it over to the other computer. Also, each computer needs its own printer, which is not only expensive but takes up valuable floor space.",
        image: Some("/images/early-computers.png"),
        replies: &[Reply {
            id: 3,
            text: "Ok, so??",
            next_id: Some(4),
        }],
    },
    DialogueNode {
        id: 4,
        body: "By connecting these computers, people could instantly send files back and forth without leaving their desks, and they could all share a single printer. This would cut down on equipment costs and free up space in the room.\n\nI can also think of another benefit - people could send each other quick messages directly through the computers, allowing them to communicate instantly without leaving their desks.",
        image: None,
        replies: &[Reply {
            id: 5,
            text: "Okay, cool. So where do we start? How do we connect them, like with a wire or something?",
            next_id: Some(6),
        }],
    },
    DialogueNode {
        id: 6,
        body: "Yep, a wire's pretty much our only option right now. I think we should use a coaxial cable (like what's used for connecting TVs to satellite dishes) because it's good at keeping the signals clear by blocking stuff that could mess them up, like other electronics in the room.\n\nIn networking terms, the wire is called the **transmission medium**. It's the physical path the data travels through to get from one computer to another.",
        image: Some("/images/coaxial-cable.png"),
        replies: &[Reply {
            id: 7,
            text: "OK, so what's the next step?",
            next_id: Some(8),
        }],
    },
    DialogueNode {
        id: 8,
        body: "We need to figure out how we are going to hook up the computers..\n🔗 We could run one long wire in a straight line and tap all the computers into it.\n🌟 Or we could use a device in the middle and connect each computer to that with its own wire.\n🔄 Or we could link every computer directly to all the others with wires.\nI think the straight-line idea might be simpler to start with.",
        image: Some("/images/network-topologies-new.png"),
        replies: &[Reply {
            id: 9,
            text: "Let me guess, there's a fancy networking word for how we hook them up, right? 😏",
            next_id: Some(10),
        }],
    },
    DialogueNode {
        id: 10,
        body: "Yep, there is! It's called the **topology**. That's the name for how computers are arranged and connected in a network.",
        image: None,
        replies: &[Reply {
            id: 11,
            text: "Got it. Now, data is stored as 1s and 0s inside a computer. How do we send those 1s and 0s through a wire?",
            next_id: Some(12),
        }],
    },
    DialogueNode {
        id: 12,
        body: "Good question! We could use voltage to represent them. Like, maybe 5 volts means a 1, and 0 volts means a 0. That way, the wire carries electrical signals that match the data.",
        image: Some("/images/voltage-binary-new.png"),
        replies: &[Reply {
            id: 13,
            text: "So, we are going to hook up these computers in a straight line using a wire. Do computers already have a spot to plug this wire into?",
            next_id: Some(14),
        }],
    },
    DialogueNode {
        id: 14,
        body: "Not quite! Computers don't come with a built-in spot for the wire yet.\n\nWe'd need to add a socket on the computer. Then, we'd put a matching connector or plug on the end of the wire so it fits perfectly into that socket, kind of like how a charger fits your phone.\n\nAlso, inside the computer, we'd need a new hardware component!",
        image: None,
        replies: &[Reply {
            id: 15,
            text: "Why is that?",
            next_id: Some(16),
        }],
    },
    DialogueNode {
        id: 16,
        body: "Because something needs to convert the 1s and 0s inside the computer to electrical signals that travel on the wire!\n\nWe'll add a hardware piece called a **Network Interface Card**, or **NIC**. It'll turn those 1s and 0s into signals to send and turn incoming signals back into 1s and 0s for the computer to understand.",
        image: Some("/images/nic-card.jpeg"),
        replies: &[Reply {
            id: 17,
            text: "Okay, so what have we sorted out so far?",
            next_id: Some(18),
        }],
    },
    DialogueNode {
        id: 18,
        body: "Good question! Let's see—we've decided on:\n\n✅ Connect all the computers with one wire in a straight line\n✅ Use voltage to send the 1s and 0s (5 volts for a 1 and 0 volts for a 0)\n✅ Add a socket to each computer for the wire connection\n✅ Install a NIC in each computer to handle the signals\n\nThat's our setup so far!\n\nOh, by the way, I just thought of an issue we might run into.",
        image: None,
        replies: &[Reply {
            id: 19,
            text: "What's that?",
            next_id: Some(20),
        }],
    },
    DialogueNode {
        id: 20,
        body: "What happens if two computers try sending data on the wire at the same time?",
        image: None,
        replies: &[Reply {
            id: 21,
            text: "Why's that a problem?",
            next_id: Some(22),
        }],
    },
    DialogueNode {
        id: 22,
        body: "If they both send signals, the voltages could overlap and get all jumbled up. It'd be like two people shouting over each other. You wouldn't understand either one.",
        image: None,
        replies: &[Reply {
            id: 23,
            text: "Oh, I see. So how do we fix that?",
            next_id: Some(24),
        }],
    },
    DialogueNode {
        id: 24,
        body: "We need a rule so only one computer sends at a time.\n\nMaybe the NIC can check the wire first. If it's quiet, it sends the data. If it hears something already on the wire, it waits a bit and tries again.",
        image: None,
        replies: &[Reply {
            id: 25,
            text: "That sounds smart. But could two computers still accidentally send at the exact same moment?",
            next_id: Some(26),
        }],
    },
    DialogueNode {
        id: 26,
        body: "It's not very likely, but yeah, it could happen if they both check at the same time and think it's clear.",
        image: None,
        replies: &[Reply {
            id: 27,
            text: "Okay, so what happens if they do?",
            next_id: Some(28),
        }],
    },
    DialogueNode {
        id: 28,
        body: "If that happens, the signals would smash into each other and get all scrambled. The data would be a mess, and no one would understand it.\n\nWe need a way to spot when this happens. Maybe the hardware could listen after sending and check if what it hears matches what it sent. If it's garbled, it knows there was a **collision** and can try again later.",
        image: None,
        replies: &[Reply {
            id: 29,
            text: "Got it! Btw, with this single-line setup, when a computer sends a document to the printer, won't every computer get it? How will the printer know it's for it and the others ignore it?",
            next_id: Some(30),
        }],
    },
    DialogueNode {
        id: 30,
        body: "Oh, good point! Since everyone's on the same wire, they'll all see the data.\n\nWe could give each device, like computers and the printer, a unique ID number. When data's sent, it includes the ID of who it's for, so the printer listens only if it's its ID, and others ignore it if it's not theirs.",
        image: None,
        replies: &[Reply {
            id: 31,
            text: "I get it. So when data's sent, it includes the ID of who it's going to?",
            next_id: Some(32),
        }],
    },
    DialogueNode {
        id: 32,
        body: "Exactly! The data would say, \"Hey, this is for ID number 3,\" or whatever.",
        image: None,
        replies: &[Reply {
            id: 33,
            text: "So the stream of 1s and 0s has the ID and the actual data together?",
            next_id: Some(34),
        }],
    },
    DialogueNode {
        id: 34,
        body: "Yep, that's the idea.",
        image: None,
        replies: &[Reply {
            id: 35,
            text: "So what exactly is this ID, then? Is it just a random number?",
            next_id: Some(36),
        }],
    },
    DialogueNode {
        id: 36,
        body: "No, it's not just a random number. Each NIC (Network Interface Card) has its own unique ID, called a **MAC address**. The MAC address is built into the NIC and is specific to each device.\n\nSo when we send data, we will use the MAC address as the ID to make sure it gets to the right device.",
        image: None,
        replies: &[Reply {
            id: 37,
            text: "Earlier, we talked about how the 1s and 0s sent across the wire represent both the data and the ID of the receiving computer. How do the computers know which part is the ID and which is the data?",
            next_id: Some(38),
        }],
    },
    DialogueNode {
        id: 38,
        body: "Oh, good catch! We'd need to set up a format, like, the first few 1s and 0s are always the ID, and everything after is the data. We'll have to agree on how many digits the ID gets so everyone's on the same page.",
        image: Some("/images/data-format-new.png"),
        replies: &[Reply {
            id: 39,
            text: "Got it. Should we also send the ID of the computer sending the data?",
            next_id: Some(40),
        }],
    },
    DialogueNode {
        id: 40,
        body: "Yeah, that's a smart idea!\n\nThat way, the receiver knows who it's from. So the stream would have the sender's ID, the receiver's ID, and then the data.",
        image: Some("/images/frame-format-new.png"),
        replies: &[Reply {
            id: 41,
            text: "Nice. People will use this to share a printer, right? What if someone sends a huge document won't it clog the wire?",
            next_id: Some(42),
        }],
    },
    DialogueNode {
        id: 42,
        body: "You're right! It could tie up the wire for a while, which would be annoying for everyone else.",
        image: None,
        replies: &[Reply {
            id: 43,
            text: "How do we deal with that? It'd be a pain if the network's stuck all the time.",
            next_id: Some(44),
        }],
    },
    DialogueNode {
        id: 44,
        body: "True. Maybe we break big data into smaller chunks. Let's call each chunk a **Frame**. Each frame gets sent separately with the IDs and a piece of the message. That way, other computers can sneak their data in between.",
        image: Some("/images/data-frames-new.png"),
        replies: &[Reply {
            id: 45,
            text: "Okay, I like that. But how will the receiving computer know what order to put those chunks in?",
            next_id: Some(46),
        }],
    },
    DialogueNode {
        id: 46,
        body: "Good question! We could add a tiny number to each packet, like \"Frame 1,\" \"Frame 2,\" so the receiver can stitch them back together in the right order.",
        image: None,
        replies: &[Reply {
            id: 47,
            text: "That works. Oh, by the way, could data get messed up on the wire? Like, a 1 turning into a 0 or something getting lost?",
            next_id: Some(48),
        }],
    },
    DialogueNode {
        id: 48,
        body: "Yeah, that can happen. Wires aren't perfect! Electrical noise or a bad connection could flip a bit here or there.",
        image: None,
        replies: &[Reply {
            id: 49,
            text: "How do we make sure the receiver gets the right data?",
            next_id: Some(50),
        }],
    },
    DialogueNode {
        id: 50,
        body: "We could add a little check at the end of each packet. Like, count up the 1s in the data and send that number along. The receiver does the same count, if it matches, the data's good. If not, something's off.",
        image: None,
        replies: &[Reply {
            id: 51,
            text: "Cool, that makes sense. But what does the receiver do if the data's wrong?",
            next_id: Some(52),
        }],
    },
    DialogueNode {
        id: 52,
        body: "Hmm, I think it should ask the sender to try again. Like, \"Hey, that frame didn't add up, send it one more time.\"",
        image: None,
        replies: &[Reply {
            id: 53,
            text: "Perfect. I think we've got a solid plan here!",
            next_id: Some(54),
        }],
    },
    DialogueNode {
        id: 54,
        body: "Yeah, me too! We've got the wire, details of the socket and the connector, the voltage signals, collision handling, IDs, frames, order numbers, and a way to check for errors. It's starting to sound like a real network!",
        image: None,
        replies: &[Reply {
            id: 55,
            text: "Cool!",
            next_id: Some(56),
        }],
    },
    DialogueNode {
        id: 56,
        body: "If everyone follows the process and rules we've come up with, the whole thing works.\n\nThese rules are called **protocols**.\n\nThey cover everything from what kind of wire and socket we use to how data is sent, how we check for problems, and how we put it all back together at the other end. Without protocols, none of the parts would know what to do.",
        image: None,
        replies: &[Reply {
            id: 57,
            text: "Got it! One thing though! I can see that the NIC is physically transporting the data across the wire, but who handles the other parts?",
            next_id: Some(58),
        }],
    },
    DialogueNode {
        id: 58,
        body: "Good catch! The chopping into frames, giving each one a part number, adding the sender and receiver IDs, and working out a number to show if the frame's okay, then sticking that on too is handled by software. This software then hands each frame to the NIC.",
        image: None,
        replies: &[Reply {
            id: 59,
            text: "Ohh OK! And what about on the receiving side?",
            next_id: Some(60),
        }],
    },
    DialogueNode {
        id: 60,
        body: "On the receiving side, the NIC picks up the 1s and 0s from the wire and puts them into frames.\n\nThen it passes those frames to the software, which checks the number, called the **checksum**, to see if each frame arrived okay. If one's messed up, it asks the sender to resend it. If they're all good, it uses the part numbers to put them back together in order.",
        image: None,
        replies: &[Reply {
            id: 61,
            text: "So the job of moving data from one computer to another computer or a printer is broken into two steps?",
            next_id: Some(62),
        }],
    },
    DialogueNode {
        id: 62,
        body: "Exactly. One step is handled by the NIC and the other is handled by the software. And if each one, on all the computers and the printer, follows the rules we've defined, then data can be transported reliably and quickly. 🚀\n\nThese steps are called **layers** in networking jargon. Each layer has its own job and its own set of rules to follow, which makes the whole system easier to build, fix, and understand. 🧩",
        image: Some("/images/network-layers.png"),
        replies: &[Reply {
            id: 63,
            text: "So can we actually start using this network now? Like to share files or print stuff?",
            next_id: Some(64),
        }],
    },
    DialogueNode {
        id: 64,
        body: "Yep! Now that our system is set up, other programs can use it. 🖥️🖨️ Say you're writing a document and want to print it. The writing program doesn't worry about how to send the data. It just tells our network software, \"Hey, send this to the printer.\" 📄➡️🖨️\n\nThe software turns the document into frames and hands them to the NIC. The NIC sends them over the wire. On the other end, the printer's NIC picks them up and passes them to its software, which puts everything back together and gets it ready to print. 🎯\n\nSo yeah… congratulations — you've just helped design your own working network from scratch. Not bad for a first try. I'd say you're thinking like a real network engineer. 🧠⚡",
        image: None,
        replies: &[Reply {
            id: 65,
            text: "Start over",
            next_id: Some(0),
        }],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_script_is_valid() {
        Script::builtin()
            .validate(Script::START_ID)
            .expect("builtin script should satisfy every table invariant");
    }

    #[test]
    fn builtin_script_has_every_step() {
        let script = Script::builtin();
        assert_eq!(script.len(), 33);
        // Ids run 0, 2, .., 64.
        for id in (0..=64).step_by(2) {
            assert!(script.get(id).is_some(), "node {id} missing");
        }
    }

    #[test]
    fn lookup_miss_is_none() {
        assert!(Script::builtin().get(1).is_none());
        assert!(Script::builtin().get(9999).is_none());
    }

    #[test]
    fn final_reply_loops_to_start() {
        let last = Script::builtin().get(64).expect("final node");
        assert_eq!(last.replies.len(), 1);
        assert_eq!(last.replies[0].id, 65);
        assert_eq!(last.replies[0].text, "Start over");
        assert_eq!(last.replies[0].next_id, Some(Script::START_ID));
    }

    #[test]
    fn validate_rejects_dangling_next() {
        static BROKEN: &[DialogueNode] = &[DialogueNode {
            id: 0,
            body: "hello",
            image: None,
            replies: &[Reply {
                id: 1,
                text: "go",
                next_id: Some(42),
            }],
        }];

        assert_eq!(
            Script::new(BROKEN).validate(0),
            Err(ScriptError::DanglingNext {
                reply_id: 1,
                next_id: 42
            })
        );
    }

    #[test]
    fn validate_rejects_missing_start() {
        static NO_START: &[DialogueNode] = &[DialogueNode {
            id: 2,
            body: "hello",
            image: None,
            replies: &[],
        }];

        assert_eq!(
            Script::new(NO_START).validate(0),
            Err(ScriptError::MissingStart(0))
        );
    }

    #[test]
    fn validate_rejects_reachable_dead_end() {
        static DEAD_END: &[DialogueNode] = &[
            DialogueNode {
                id: 0,
                body: "hello",
                image: None,
                replies: &[Reply {
                    id: 1,
                    text: "go",
                    next_id: Some(2),
                }],
            },
            DialogueNode {
                id: 2,
                body: "nothing to say",
                image: None,
                replies: &[],
            },
        ];

        assert_eq!(Script::new(DEAD_END).validate(0), Err(ScriptError::NoReplies(2)));
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        static DUPES: &[DialogueNode] = &[
            DialogueNode {
                id: 0,
                body: "a",
                image: None,
                replies: &[Reply {
                    id: 1,
                    text: "loop",
                    next_id: Some(0),
                }],
            },
            DialogueNode {
                id: 0,
                body: "b",
                image: None,
                replies: &[],
            },
        ];

        assert_eq!(Script::new(DUPES).validate(0), Err(ScriptError::DuplicateNode(0)));
    }
}
