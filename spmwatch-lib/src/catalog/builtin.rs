use crate::Watch;

/// Known locations in MEM1 of the supported game build.
pub(super) fn watches() -> Vec<Watch> {
    vec![
        watch!("Camera Mode", 0x8076ae48, Halfword),
        watch!("Camera Position X", 0x8076af9c, Float),
        watch!("Camera Position Y", 0x8076afa0, Float),
        watch!("Camera Position Z", 0x8076afa4, Float),
        watch!("Character 1", 0x804ceadc, Word),
        watch!("Character 2", 0x804ceae0, Word),
        watch!("Character 3", 0x804ceae4, Word),
        watch!("Character 4", 0x804ceae8, Word),
        watch!("Coordinate X", 0x804cd4b4, Float),
        watch!("Coordinate Y", 0x804cd4b8, Float),
        watch!("Coordinate Z", 0x804cd4bc, Float),
        watch!("Stored Z Position (7-3)", 0x804ce95c, Float),
        watch!("Hitbox X and Z", 0x804cd5ec, Float),
        watch!("Hitbox Y", 0x804cd5f0, Float),
        watch!("wallScanDistance", 0x804cd5fc, Float),
        watch!("HR X cord", 0x804cd830, Float),
        watch!("HR Y cord", 0x804cd834, Float),
        watch!("HR Z cord", 0x804cd838, Float),
        watch!("Effect", 0x804cd46b, Byte),
        watch!("Angle", 0x804cd5d0, Float),
        watch!("State", 0x804cd485, Byte),
        watch!("Sub State", 0x804cd494, Word),
        watch!("Cutscene Count (keyOff)", 0x804cd48d, Byte),
        watch!("Initial Speed", 0x804cd5a4, Float),
        watch!("Max Speed", 0x804cd5a8, Float),
        watch!("Pixl Coordinate X", 0x804cd07c, Float),
        watch!("Pixl Coordinate Y", 0x804cd080, Float),
        watch!("Pixl Coordinate Z", 0x804cd084, Float),
        watch!("Read Only Speed X and Z", 0x804cd5ac, Float),
        watch!("Respawn X", 0x804cd830, Float),
        watch!("Respawn Y", 0x804cd834, Float),
        watch!("Respawn Z", 0x804cd838, Float),
        watch!("Speed", 0x804cd828, Float),
        watch!("Flags", 0x804cd458, Word),
        watch!("Flags Misc", 0x804cd45c, Word),
        watch!("Flags Disp", 0x804cd460, Word),
        watch!("Flags Status", 0x804cd468, Word),
        watch!("Flags Effect", 0x804cd46c, Byte),
        watch!("X Scaling", 0x804cd514, Float),
        watch!("Y Scaling", 0x804cd518, Float),
        watch!("Z Scaling", 0x804cd51c, Float),
        watch!("Item slot 1", 0x804cea88, Halfword),
        watch!("Item slot 2", 0x804cea8a, Halfword),
        watch!("Item slot 3", 0x804cea8c, Halfword),
        watch!("Item slot 4", 0x804cea8e, Halfword),
        watch!("Item slot 5", 0x804cea90, Halfword),
        watch!("Item slot 6", 0x804cea92, Halfword),
        watch!("Item slot 7", 0x804cea94, Halfword),
        watch!("Item slot 8", 0x804cea96, Halfword),
        watch!("Item slot 9", 0x804cea98, Halfword),
        watch!("Item slot 10", 0x804cea9a, Halfword),
        watch!("Key Item 1", 0x804cea48, Halfword),
        watch!("Key Item 2", 0x804cea4a, Halfword),
        watch!("Key Item 3", 0x804cea4c, Halfword),
        watch!("Key Item 4", 0x804cea4e, Halfword),
        watch!("Key Item 5", 0x804cea50, Halfword),
        watch!("Key Item 6", 0x804cea52, Halfword),
        watch!("Key Item 7", 0x804cea54, Halfword),
        watch!("Key Item 8", 0x804cea56, Halfword),
        watch!("Key Item 9", 0x804cea58, Halfword),
        watch!("Key Item 10", 0x804cea5a, Halfword),
        watch!("Key Item 11", 0x804cea5c, Halfword),
        watch!("Key Item 12", 0x804cea5e, Halfword),
        watch!("Key Item 13", 0x804cea60, Halfword),
        watch!("Key Item 14", 0x804cea62, Halfword),
        watch!("Key Item 15", 0x804cea64, Halfword),
        watch!("Key Item 16", 0x804cea66, Halfword),
        watch!("Key Item 17", 0x804cea68, Halfword),
        watch!("Key Item 18", 0x804cea6a, Halfword),
        watch!("Key Item 19", 0x804cea6c, Halfword),
        watch!("Key Item 20", 0x804cea6e, Halfword),
        watch!("Key Item 21", 0x804cea70, Halfword),
        watch!("Key Item 22", 0x804cea72, Halfword),
        watch!("Key Item 23", 0x804cea74, Halfword),
        watch!("Key Item 24", 0x804cea76, Halfword),
        watch!("Key Item 25", 0x804cea78, Halfword),
        watch!("Key Item 26", 0x804cea7a, Halfword),
        watch!("Key Item 27", 0x804cea7c, Halfword),
        watch!("Key Item 28", 0x804cea7e, Halfword),
        watch!("Key Item 29", 0x804cea80, Halfword),
        watch!("Key Item 30", 0x804cea82, Halfword),
        watch!("Key Item 31", 0x804cea84, Halfword),
        watch!("Key Item 32", 0x804cea86, Halfword),
        watch!("Pixl slot 1", 0x804ceaec, Word),
        watch!("Pixl slot 2", 0x804ceaf0, Word),
        watch!("Pixl slot 3", 0x804ceaf4, Word),
        watch!("Pixl slot 4", 0x804ceaf8, Word),
        watch!("Pixl slot 5", 0x804ceafc, Word),
        watch!("Pixl slot 6", 0x804ceb00, Word),
        watch!("Pixl slot 7", 0x804ceb04, Word),
        watch!("Pixl slot 8", 0x804ceb08, Word),
        watch!("Pixl slot 9", 0x804ceb0c, Word),
        watch!("Pixl slot 10", 0x804ceb10, Word),
        watch!("Pixl slot 11", 0x804ceb14, Word),
        watch!("Pixl slot 12 (Unused)", 0x804ceb18, Word),
        watch!("Pixl slot 13 (Unused)", 0x804ceb1c, Word),
        watch!("Pixl slot 14 (Unused)", 0x804ceb20, Word),
        watch!("Pixl slot 15 (Unused)", 0x804ceb24, Word),
        watch!("Pixl slot 16 (Unused)", 0x804ceb28, Word),
        watch!("File name", 0x804e2570, String),
        watch!("Savefile ID", 0x804e262c, Word),
        watch!("Language", 0x804e2558, Word),
        watch!("Game Speed", 0x804e256c, Float),
        watch!("Map to Save", 0x804e2594, String),
        watch!("NextArea", 0x804cf240, String),
        watch!("NextBero", 0x804cf280, String),
        watch!("NextMap", 0x804cf260, String),
        watch!("NowSeq", 0x8056d0d8, Word),
        watch!("NextSeq", 0x8056d0dc, Word),
        watch!("Sequence Position", 0x804e2690, Word),
        watch!("In Transition", 0x807aefac, Word),
        watch!("Out Transition", 0x807aefb0, Word),
        watch!("Map Transition Stage", 0x804cf364, Word),
        watch!("2-3 Rubees", 0x804e2b61, Word),
        watch!("Rubees to Win (Generator Room)", 0x804c9994, Word),
        watch!("Rubees to Win / 30 (VIP Room)", 0x804c9998, Word),
        watch!("3D Gauge", 0x804cea3c, Word),
        watch!("Attack", 0x804cea30, Word),
        watch!("Coins", 0x804cea44, Word),
        watch!("Flipside Tokens", 0x804cf0b0, Word),
        watch!("HP", 0x804cea34, Word),
        watch!("Level", 0x804cea2c, Word),
        watch!("Max HP", 0x804cea38, Word),
        watch!("Score", 0x804cea40, Word),
        watch!("3D Mode", 0x8076ae4a, Halfword),
        watch!("Effect Timer", 0x804ce2e0, Float),
        watch!("Current Character", 0x804cd490, Byte),
        watch!("Gravity Side", 0x804ce7bb, Byte),
        watch!("Gravity Vector X", 0x804ce7c8, Float),
        watch!("Gravity Vector Y", 0x804ce7cc, Float),
        watch!("Gravity Vector Z", 0x804ce7d0, Float),
        watch!("Gravity Vector Reciprocal X", 0x804ce7bc, Float),
        watch!("Gravity Vector Reciprocal Y", 0x804ce7c0, Float),
        watch!("Gravity Vector Reciprocal Z", 0x804ce7c4, Float),
        watch!("Inputs", 0x804cd764, Byte),
        watch!("Invincibility Timer", 0x804cd4a0, Float),
        watch!("Map Render Mode", 0x8076afdb, Byte),
        watch!("Mega Star Timer", 0x804cd840, Float),
        watch!("Pane #", 0x804ce9a8, Word),
        watch!("Pit IGT", 0x804d0e08, Word),
        watch!("Pit Key X", 0x80781eb4, Float),
        watch!("Pit Key Y", 0x80781eb8, Float),
        watch!("Pit Key Z", 0x80781ebc, Float),
        watch!("Pit Room", 0x804e2a95, Byte),
        watch!("Pixl State", 0x804cd05f, Byte),
        watch!("RNG seed", 0x8056d13c, Word),
        watch!("Swimming Speed", 0x804cd5b0, Float),
        watch!("Time Freeze", 0x804e2560, Word),
        watch!("Tippi", 0x804cd398, Word),
        watch!("Tippi State", 0x804cd3b8, Word),
        watch!("MarioGameSpeedScale", 0x8056d908, Float),
        watch!("Gravity (Ascent) (Mario)", 0x803e744c, Float),
        watch!("Gravity (Descent) (Mario)", 0x803e745c, Float),
        watch!("FlipFlop Pipe", 0x804e26d5, BitField(0x40)),
    ]
}
